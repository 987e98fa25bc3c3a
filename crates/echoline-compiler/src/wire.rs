//! JSON payload consumed by display clients.
//!
//! Every key that would carry its default value is left out, so a plain
//! segment is just `{"text": "..."}`.

use serde::Serialize;

use crate::{
    message::{CompiledMessage, Event},
    style::{CLASS_PREFIX, StyleAttributes, StyledSegment},
};

/// Named size steps, smallest first. A delta of zero is `middle`.
pub const SIZE_STEPS: [&str; 5] = ["extra-small", "small", "middle", "large", "extra-large"];
const MIDDLE: usize = 2;

#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub action: &'static str,
    pub data: Data<'a>,
}

/// Client control message with no message body, such as `echo_next`.
#[derive(Debug, Serialize)]
pub struct Control {
    pub action: &'static str,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Asks clients to finish the current message and move on.
pub const ECHO_NEXT: &str = "echo_next";

#[derive(Debug, Serialize)]
pub struct Data<'a> {
    pub username: &'a str,
    pub messages: Vec<WireSegment<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<WireEvent<'a>>,
    #[serde(rename = "start-par")]
    pub start_paragraph: bool,
}

#[derive(Debug, Serialize)]
pub struct WireSegment<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "WireStyle::is_empty")]
    pub style: WireStyle<'a>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct WireStyle<'a> {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strike: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum WireEvent<'a> {
    Pause {
        duration: u32,
    },
    Echo {
        text: &'a str,
        data: &'a str,
        speed: u32,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl WireStyle<'_> {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl<'a> From<&'a StyleAttributes> for WireStyle<'a> {
    fn from(style: &'a StyleAttributes) -> Self {
        Self {
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strike: style.strike,
            color: style.color.as_deref(),
            size: size_name(style.size_delta),
            class_name: class_list(style),
        }
    }
}

impl<'a> From<&'a StyledSegment> for WireSegment<'a> {
    fn from(segment: &'a StyledSegment) -> Self {
        Self {
            text: &segment.text,
            emoji: segment.style.emoji_id.as_deref(),
            style: WireStyle::from(&segment.style),
        }
    }
}

impl<'a> From<&'a Event> for WireEvent<'a> {
    fn from(event: &'a Event) -> Self {
        match event {
            Event::Pause { duration_ms } => Self::Pause {
                duration: *duration_ms,
            },
            Event::Typewriting {
                phonetic_data,
                delay_ms,
                source_text,
                ..
            } => Self::Echo {
                text: source_text,
                data: phonetic_data,
                speed: *delay_ms,
            },
        }
    }
}

/// Maps a size delta onto [`SIZE_STEPS`], clamping at both ends. `middle`
/// is the client default and maps to `None`.
pub fn size_name(delta: i32) -> Option<&'static str> {
    let index = (MIDDLE as i64 + i64::from(delta)).clamp(0, SIZE_STEPS.len() as i64 - 1) as usize;
    (index != MIDDLE).then_some(SIZE_STEPS[index])
}

fn class_list(style: &StyleAttributes) -> Option<String> {
    let mut classes = Vec::new();
    if let Some(class) = &style.class_name {
        classes.push(class.css_class());
    }
    if style.code {
        classes.push(format!("{CLASS_PREFIX}code"));
    }
    (!classes.is_empty()).then(|| classes.join(" "))
}

pub fn to_payload(message: &CompiledMessage) -> Payload<'_> {
    Payload {
        action: "send",
        data: Data {
            username: &message.username,
            messages: message.segments.iter().map(WireSegment::from).collect(),
            events: message.events.iter().map(WireEvent::from).collect(),
            start_paragraph: message.start_paragraph,
        },
    }
}

/// Serializes `message` as a single-line JSON payload.
pub fn to_json(message: &CompiledMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_payload(message))
}

/// Serializes a body-less control action such as [`ECHO_NEXT`].
pub fn control_json(action: &'static str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Control {
        action,
        data: serde_json::Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TypewritingScheme, style::ClassName};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample() -> CompiledMessage {
        CompiledMessage {
            username: "【Someone】".to_string(),
            segments: vec![
                StyledSegment::new(
                    "Hi ",
                    StyleAttributes {
                        bold: true,
                        size_delta: 1,
                        ..Default::default()
                    },
                ),
                StyledSegment::emoji("wave", StyleAttributes::default()),
                StyledSegment::new(
                    "there",
                    StyleAttributes {
                        color: Some("#f00".to_string()),
                        code: true,
                        class_name: Some(ClassName {
                            name: "glow".to_string(),
                            prefixed: true,
                        }),
                        ..Default::default()
                    },
                ),
            ],
            events: vec![
                Event::Typewriting {
                    scheme: TypewritingScheme::Pinyin,
                    phonetic_data: "ni'hao".to_string(),
                    delay_ms: 30,
                    source_text: "你好".to_string(),
                },
                Event::Pause { duration_ms: 300 },
            ],
            start_paragraph: false,
        }
    }

    #[test]
    fn snapshot_payload() {
        let json = serde_json::to_string_pretty(&to_payload(&sample())).unwrap();
        assert_snapshot!(json, @r##"
        {
          "action": "send",
          "data": {
            "username": "【Someone】",
            "messages": [
              {
                "text": "Hi ",
                "style": {
                  "bold": true,
                  "size": "large"
                }
              },
              {
                "text": "",
                "emoji": "wave"
              },
              {
                "text": "there",
                "style": {
                  "color": "#f00",
                  "className": "echo-text-glow echo-text-code"
                }
              }
            ],
            "events": [
              {
                "name": "echo",
                "text": "你好",
                "data": "ni'hao",
                "speed": 30
              },
              {
                "name": "pause",
                "duration": 300
              }
            ],
            "start-par": false
          }
        }
        "##);
    }

    #[test]
    fn plain_message_is_minimal() {
        let message = CompiledMessage {
            username: "u".to_string(),
            segments: vec![StyledSegment::plain("hi")],
            events: vec![],
            start_paragraph: true,
        };
        assert_eq!(
            to_json(&message).unwrap(),
            r#"{"action":"send","data":{"username":"u","messages":[{"text":"hi"}],"start-par":true}}"#
        );
    }

    #[test]
    fn echo_next_control_has_empty_data() {
        assert_eq!(
            control_json(ECHO_NEXT).unwrap(),
            r#"{"action":"echo_next","data":{}}"#
        );
    }

    #[rstest]
    #[case(0, None)]
    #[case(1, Some("large"))]
    #[case(2, Some("extra-large"))]
    #[case(9, Some("extra-large"))]
    #[case(-1, Some("small"))]
    #[case(-2, Some("extra-small"))]
    #[case(i32::MIN, Some("extra-small"))]
    fn size_steps_clamp(#[case] delta: i32, #[case] expected: Option<&str>) {
        assert_eq!(size_name(delta), expected);
    }

    #[test]
    fn raw_class_is_not_prefixed() {
        let style = StyleAttributes {
            class_name: Some(ClassName {
                name: "shake".to_string(),
                prefixed: false,
            }),
            ..Default::default()
        };
        assert_eq!(WireStyle::from(&style).class_name.as_deref(), Some("shake"));
    }
}
