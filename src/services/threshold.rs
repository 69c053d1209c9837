use std::sync::Arc;

use serde_json::json;
use tokio::sync::{mpsc, Semaphore};

use crate::error::ThresholdError;
use crate::models::{ThresholdAck, ThresholdCheck, ThresholdRequest};
use crate::services::callback::CallbackDispatcher;
use crate::services::price_service::PriceComposer;

/// How a single threshold check ended
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdOutcome {
    /// Condition held and the success callback was attempted
    Met { delivered: bool },
    /// Condition did not hold; nothing is sent
    NotMet,
    /// Price or currency could not be resolved; the failure callback was attempted
    Failed { delivered: bool },
}

/// Evaluates threshold checks against a fresh price and fires the matching callback
#[derive(Clone)]
pub struct ThresholdEngine {
    composer: PriceComposer,
    dispatcher: CallbackDispatcher,
}

impl ThresholdEngine {
    pub fn new(composer: PriceComposer, dispatcher: CallbackDispatcher) -> Self {
        Self {
            composer,
            dispatcher,
        }
    }

    /// Evaluate one check. Runs to completion; at most one callback is sent.
    pub async fn evaluate(&self, check: &ThresholdCheck) -> ThresholdOutcome {
        let condition = &check.condition;
        tracing::info!(
            check_id = %check.id,
            "Testing threshold: {} {} {}",
            condition.direction,
            condition.currency,
            condition.amount
        );

        // Threshold checks always bypass any cached rate
        let price = match self.composer.compose(true).await {
            Ok(price) => price,
            Err(e) => return self.fail(check, e.to_string()).await,
        };

        let currency = match condition.resolve_currency() {
            Ok(currency) => currency,
            Err(e) => return self.fail(check, e.to_string()).await,
        };

        let current = price.rate_in(currency);
        if !condition.is_met(current) {
            tracing::info!(
                check_id = %check.id,
                "Threshold not met (amount {}, current {} {})",
                condition.amount,
                current,
                currency
            );
            return ThresholdOutcome::NotMet;
        }

        tracing::info!(
            check_id = %check.id,
            "Threshold met (amount {}, current {} {}), posting to {}",
            condition.amount,
            current,
            currency,
            check.endpoints.success
        );
        let delivered = self
            .dispatcher
            .notify(&check.endpoints.success, &json!({ "currentPrice": price }))
            .await;
        ThresholdOutcome::Met { delivered }
    }

    async fn fail(&self, check: &ThresholdCheck, message: String) -> ThresholdOutcome {
        tracing::warn!(
            check_id = %check.id,
            "Threshold check failed: {}, posting to {}",
            message,
            check.endpoints.failure
        );
        let delivered = self
            .dispatcher
            .notify(&check.endpoints.failure, &json!({ "error": message }))
            .await;
        ThresholdOutcome::Failed { delivered }
    }

    /// Start the background pool and return a handle for submitting checks.
    ///
    /// Up to `capacity` checks wait in the queue and at most `workers`
    /// evaluations run concurrently. Must be called inside a Tokio runtime.
    pub fn spawn(self, workers: usize, capacity: usize) -> ThresholdQueue {
        let (sender, mut receiver) = mpsc::channel::<ThresholdCheck>(capacity.max(1));
        let permits = Arc::new(Semaphore::new(workers.max(1)));

        tokio::spawn(async move {
            while let Some(check) = receiver.recv().await {
                let permit = match permits.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let engine = self.clone();
                tokio::spawn(async move {
                    let outcome = engine.evaluate(&check).await;
                    tracing::debug!(check_id = %check.id, "Threshold check finished: {:?}", outcome);
                    drop(permit);
                });
            }
            tracing::info!("Threshold queue closed");
        });

        ThresholdQueue { sender }
    }
}

/// Submission handle for the threshold pool
#[derive(Clone)]
pub struct ThresholdQueue {
    sender: mpsc::Sender<ThresholdCheck>,
}

impl ThresholdQueue {
    /// Validate a request and enqueue it for background evaluation.
    /// Returns the derived callback URLs without waiting for the result.
    pub fn submit(&self, request: ThresholdRequest) -> Result<ThresholdAck, ThresholdError> {
        let check = request.validate()?;
        let ack = check.endpoints.ack();
        let check_id = check.id;

        self.sender.try_send(check).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                tracing::warn!(check_id = %check_id, "Threshold queue full, rejecting check");
                ThresholdError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => {
                tracing::error!(check_id = %check_id, "Threshold queue is closed");
                ThresholdError::QueueClosed
            }
        })?;

        tracing::info!(check_id = %check_id, "Queued threshold check");
        Ok(ack)
    }
}
