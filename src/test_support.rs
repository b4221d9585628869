//! Scripted stand-in for the prediction backend

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::api::predictor::{ApiError, PredictionApi};
use crate::models::{RangeOutcome, RangeRequest, SingleCheckRequest};

enum Reply<T> {
    Ready(Result<T, ApiError>),
    Deferred(oneshot::Receiver<Result<T, ApiError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, ApiError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Deferred(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::RequestError("reply dropped".to_string()))),
        }
    }
}

/// Answers calls from queues, in order, and records every request it saw
#[derive(Default)]
pub struct ScriptedApi {
    single: Mutex<VecDeque<Reply<String>>>,
    range: Mutex<VecDeque<Reply<RangeOutcome>>>,
    single_requests: Mutex<Vec<SingleCheckRequest>>,
    range_requests: Mutex<Vec<RangeRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_single(&self, result: Result<String, ApiError>) {
        self.single.lock().unwrap().push_back(Reply::Ready(result));
    }

    pub fn push_range(&self, result: Result<RangeOutcome, ApiError>) {
        self.range.lock().unwrap().push_back(Reply::Ready(result));
    }

    /// Queue a range reply that resolves only when the returned sender fires
    pub fn defer_range(&self) -> oneshot::Sender<Result<RangeOutcome, ApiError>> {
        let (sender, receiver) = oneshot::channel();
        self.range.lock().unwrap().push_back(Reply::Deferred(receiver));
        sender
    }

    pub fn single_calls(&self) -> usize {
        self.single_requests.lock().unwrap().len()
    }

    pub fn range_calls(&self) -> usize {
        self.range_requests.lock().unwrap().len()
    }

    pub fn single_requests(&self) -> Vec<SingleCheckRequest> {
        self.single_requests.lock().unwrap().clone()
    }

    pub fn range_requests(&self) -> Vec<RangeRequest> {
        self.range_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionApi for ScriptedApi {
    async fn predict_single(&self, request: &SingleCheckRequest) -> Result<String, ApiError> {
        self.single_requests.lock().unwrap().push(request.clone());
        let reply = self.single.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(ApiError::RequestError("no scripted reply".to_string())),
        }
    }

    async fn analyze_range(&self, request: &RangeRequest) -> Result<RangeOutcome, ApiError> {
        self.range_requests.lock().unwrap().push(*request);
        let reply = self.range.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(ApiError::RequestError("no scripted reply".to_string())),
        }
    }
}
