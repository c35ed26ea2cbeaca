use airwise_chat::{ApiError, ChatClient, ChatReply};
use std::cell::RefCell;
use std::path::Path;

pub const CITY_DAY: &str = "\
City,Date,PM2.5,PM10,NO2,AQI,AQI_Bucket
Delhi,2020-06-30,80.1,190.2,30.0,210,Poor
Delhi,2020-07-01,95.5,210.0,31.2,420,Severe
Mumbai,2020-07-01,20.0,55.0,12.0,80,Satisfactory
Mumbai,2020-06-30,30.0,75.0,12.0,120,Moderate
Patna,2020-07-01,,,,,
Patna,2020-06-29,60.0,120.0,20.0,250,Poor
Chennai,2020-07-01,25.0,40.0,9.0,65,Satisfactory
";

pub const STATION_DAY: &str = "\
StationId,Date,PM2.5,PM10,AQI,AQI_Bucket
DL001,2020-07-01,110.0,250.0,395,Very Poor
DL001,2020-06-30,90.0,200.0,300,Poor
MH005,2020-07-01,18.0,50.0,70,Satisfactory
XX999,2020-07-01,5.0,10.0,20,Good
";

pub const STATIONS: &str = "\
StationId,StationName,City,State,Status
DL001,Anand Vihar,Delhi,Delhi,Active
MH005,Bandra,Mumbai,Maharashtra,Active
";

/// Writes the three dataset files into `dir`
pub fn write_dataset(dir: &Path) {
    std::fs::write(dir.join("city_day.csv"), CITY_DAY).unwrap();
    std::fs::write(dir.join("station_day.csv"), STATION_DAY).unwrap();
    std::fs::write(dir.join("stations.csv"), STATIONS).unwrap();
}

/// Replays canned results and records every request
pub struct MockClient {
    script: RefCell<Vec<Result<ChatReply, ApiError>>>,
    pub prompts: RefCell<Vec<(String, String)>>,
}

impl MockClient {
    pub fn new(mut script: Vec<Result<ChatReply, ApiError>>) -> Self {
        script.reverse();
        Self {
            script: RefCell::new(script),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn ok(content: &str, service_time: f64) -> Result<ChatReply, ApiError> {
        Ok(ChatReply {
            content: content.to_string(),
            service_time: Some(service_time),
        })
    }

    pub fn rate_limited() -> Result<ChatReply, ApiError> {
        Err(ApiError::Status {
            status: 429,
            body: "rate limit reached".to_string(),
        })
    }
}

impl ChatClient for MockClient {
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<ChatReply, ApiError> {
        self.prompts
            .borrow_mut()
            .push((system_prompt.to_string(), user_query.to_string()));
        self.script.borrow_mut().pop().unwrap_or(Err(ApiError::EmptyReply))
    }
}
