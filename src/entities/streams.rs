use redis::{FromRedisValue, RedisError, RedisResult, Value};
use tracing::warn;

pub struct StreamEvent<'a> {
    event: &'a str,
    data: String,
}

impl<'a> StreamEvent<'a> {
    pub fn new(event: &'a str, payload: &serde_json::Value) -> Self {
        Self {
            event,
            data: payload.to_string(),
        }
    }

    pub fn items(&'a self) -> [(&'static str, &'a [u8]); 2] {
        [("event", self.event.as_bytes()), ("data", self.data.as_bytes())]
    }
}

#[derive(Debug)]
pub struct StreamReadReply {
    pub streams: Vec<StreamReply>,
}

#[derive(Debug)]
pub struct StreamReply {
    pub stream_name: String,
    pub events: Vec<StreamReadEvent>,
}

#[derive(Debug)]
pub struct StreamReadEvent {
    pub event_id: String,
    pub event: String,
    pub data: serde_json::Value,
}

macro_rules! array {
    ($e:expr) => {
        match $e {
            Value::Array(a) => a,
            v => return Err(invalid_stream_response(v)),
        }
    };
}

fn process_stream_event(entry: &Value) -> RedisResult<StreamReadEvent> {
    let entry = array!(entry);
    if entry.len() != 2 {
        return Err(invalid_stream_response(&Value::Array(entry.clone())));
    }
    let event_id = String::from_redis_value(&entry[0])?;

    let mut event = None;
    let mut data = None;
    for chunk in array!(&entry[1]).chunks_exact(2) {
        let key = String::from_redis_value(&chunk[0])?;
        let value = <Vec<u8>>::from_redis_value(&chunk[1])?;
        if key == "event" {
            event = Some(String::from_utf8_lossy(&value).into_owned());
        } else if key == "data" {
            data = Some(serde_json::from_slice(&value).map_err(RedisError::from)?);
        } else {
            warn!("Unknown redis stream event key: {key}");
        }
    }
    match (event, data) {
        (Some(event), Some(data)) => Ok(StreamReadEvent {
            event_id,
            event,
            data,
        }),
        _ => Err(RedisError::from((
            redis::ErrorKind::TypeError,
            "Stream entry is missing fields",
            event_id,
        ))),
    }
}

fn process_stream_reply(reply: &[Value]) -> RedisResult<StreamReply> {
    if reply.len() != 2 {
        return Err(invalid_stream_response(&Value::Array(reply.to_vec())));
    }
    let stream_name = String::from_redis_value(&reply[0])?;
    let events = array!(&reply[1]);
    let events = events
        .iter()
        .map(process_stream_event)
        .collect::<RedisResult<Vec<_>>>()?;
    Ok(StreamReply {
        stream_name,
        events,
    })
}

impl FromRedisValue for StreamReadReply {
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        let stream_replies = array!(v);
        let mut streams = vec![];
        for reply in stream_replies {
            let reply = array!(reply);
            let stream = process_stream_reply(reply)?;
            streams.push(stream);
        }

        Ok(StreamReadReply { streams })
    }
}

fn invalid_stream_response(value: &Value) -> RedisError {
    RedisError::from((
        redis::ErrorKind::TypeError,
        "Response was of incompatible type",
        format!("Response type not stream compatible. (response was {value:?})"),
    ))
}
