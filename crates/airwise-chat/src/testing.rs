//! Scripted chat client for unit tests

use crate::client::{ChatClient, ChatReply};
use crate::error::ApiError;
use std::cell::RefCell;
use std::collections::VecDeque;

pub(crate) struct ScriptedClient {
    replies: RefCell<VecDeque<Result<ChatReply, ApiError>>>,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<ChatReply, ApiError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn reply(content: &str, service_time: Option<f64>) -> Result<ChatReply, ApiError> {
        Ok(ChatReply {
            content: content.to_string(),
            service_time,
        })
    }

    pub fn failure() -> Result<ChatReply, ApiError> {
        Err(ApiError::Status {
            status: 429,
            body: "rate limit reached".to_string(),
        })
    }
}

impl ChatClient for ScriptedClient {
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<ChatReply, ApiError> {
        self.calls
            .borrow_mut()
            .push((system_prompt.to_string(), user_query.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ApiError::EmptyReply))
    }
}

pub(crate) fn sample_context() -> airwise_core::GroundingContext {
    use airwise_core::{Config, EntityKind, GroundingContext, LatestTable, Observation};

    let cities = LatestTable::new(
        EntityKind::City,
        vec![
            Observation::new(EntityKind::City, "Delhi", 420.0).with_bucket("Severe"),
            Observation::new(EntityKind::City, "Mumbai", 80.0).with_bucket("Satisfactory"),
        ],
    );
    let mut station = Observation::new(EntityKind::Station, "DL001", 395.0);
    station.station_name = Some("Anand Vihar".to_string());
    let stations = LatestTable::new(EntityKind::Station, vec![station]);

    GroundingContext::new(
        &cities,
        &stations,
        &cities.names(),
        &stations.names(),
        &Config::new(),
    )
}
