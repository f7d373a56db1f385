//! Message processing: decode, risk check, lifecycle.

use super::core::Pipeline;
use super::results::{OrderResult, Outcome, PipelineError};
use crate::events::{
    EventPayload, EventSink, OrderCreatedEvent, OrderFilledEvent, OrderRejectedEvent,
};
use crate::order::Order;
use crate::types::OrderState;

impl Pipeline {
    /// Process one raw message.
    ///
    /// Decode and order construction failures return an error before any event is
    /// recorded. Otherwise the sink receives `OrderCreated` followed by exactly one
    /// of `OrderFilled` or `OrderRejected`.
    pub fn process_message(
        &self,
        raw: &str,
        sink: &mut dyn EventSink,
    ) -> Result<OrderResult, PipelineError> {
        let fields = self.decoder.decode(raw)?;
        let mut order = Order::from_fields(&fields)?;

        sink.record(EventPayload::OrderCreated(OrderCreatedEvent { fields }));

        let outcome = self.execute(&mut order);
        match &outcome {
            Outcome::Filled => {
                tracing::info!(symbol = %order.symbol, side = %order.side, qty = order.quantity.value(), "order filled");
                sink.record(EventPayload::OrderFilled(OrderFilledEvent {
                    symbol: order.symbol.clone(),
                    qty: order.quantity.value(),
                }));
            }
            Outcome::Rejected { reason } => {
                tracing::info!(symbol = %order.symbol, %reason, "order rejected");
                sink.record(EventPayload::OrderRejected(OrderRejectedEvent {
                    reason: reason.clone(),
                }));
            }
        }

        Ok(OrderResult { order, outcome })
    }

    /// Process messages in order. One result per message; a failed message does not
    /// stop the ones after it.
    pub fn process_batch<'a, I>(
        &self,
        messages: I,
        sink: &mut dyn EventSink,
    ) -> Vec<Result<OrderResult, PipelineError>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        messages
            .into_iter()
            .map(|raw| {
                let result = self.process_message(raw, sink);
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "message dropped");
                }
                result
            })
            .collect()
    }

    // check, ack, book and fill under one lock so no other pipeline can slip an
    // update between the check and the position change
    fn execute(&self, order: &mut Order) -> Outcome {
        let mut risk = self.risk.lock();

        if let Err(e) = risk.check(order) {
            order.transition(OrderState::Rejected);
            return Outcome::Rejected {
                reason: e.to_string(),
            };
        }

        order.transition(OrderState::Acked);
        risk.update_position(order);
        order.transition(OrderState::Filled);
        Outcome::Filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::decoder::DecodeError;
    use crate::order::OrderError;

    #[test]
    fn fills_and_books_position() {
        let pipeline = Pipeline::default();
        let mut events: Vec<EventPayload> = Vec::new();

        let result = pipeline
            .process_message("8=FIX.4.2|35=D|55=AAPL|54=1|38=500|40=2|10=128", &mut events)
            .unwrap();

        assert!(result.is_filled());
        assert_eq!(result.order.state(), OrderState::Filled);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "OrderCreated");
        assert_eq!(
            events[1],
            EventPayload::OrderFilled(OrderFilledEvent {
                symbol: "AAPL".to_string(),
                qty: 500
            })
        );
        assert_eq!(pipeline.positions().get("AAPL"), Some(500));
    }

    #[test]
    fn oversized_order_rejected() {
        let pipeline = Pipeline::default();
        let mut events: Vec<EventPayload> = Vec::new();

        let result = pipeline
            .process_message("8=FIX.4.2|35=D|55=MSFT|54=1|38=5000|40=2|10=128", &mut events)
            .unwrap();

        assert_eq!(result.order.state(), OrderState::Rejected);
        assert!(result.rejection_reason().unwrap().contains("exceeds"));
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], EventPayload::OrderRejected(e) if e.reason.contains("exceeds")));
        assert_eq!(pipeline.positions().get("MSFT"), None);
    }

    #[test]
    fn decode_failure_emits_nothing() {
        let pipeline = Pipeline::default();
        let mut events: Vec<EventPayload> = Vec::new();

        assert_eq!(
            pipeline.process_message("", &mut events),
            Err(PipelineError::Decode(DecodeError::EmptyInput))
        );
        assert!(matches!(
            pipeline.process_message("35=D|55=AAPL|54=9|38=10", &mut events),
            Err(PipelineError::Order(OrderError::UnknownSide { .. }))
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn configured_delimiter_is_used() {
        let pipeline = Pipeline::new(&PipelineConfig::fix_wire()).unwrap();
        let mut events: Vec<EventPayload> = Vec::new();

        let result = pipeline
            .process_message("35=D\x0155=IBM\x0154=2\x0138=300", &mut events)
            .unwrap();

        assert!(result.is_filled());
        assert_eq!(pipeline.position("IBM"), -300);
    }

    #[test]
    fn batch_continues_after_bad_message() {
        let pipeline = Pipeline::default();
        let mut events: Vec<EventPayload> = Vec::new();

        let results = pipeline.process_batch(
            ["35=D|55=AAPL|54=1|38=100", "garbage", "35=D|55=AAPL|54=2|38=40"],
            &mut events,
        );

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(events.len(), 4);
        assert_eq!(pipeline.position("AAPL"), 60);
    }
}
