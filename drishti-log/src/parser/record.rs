//! Structured payload decoding.
//!
//! A marker-bearing line carries one XML element after its `": "`
//! separator. The element is decoded into a small [`RecordNode`] tree and
//! then interpreted as one of the known [`Record`] kinds.

use xml::reader::{EventReader, ParserConfig, XmlEvent};

use super::error::RecordError;
use super::scanner;
use crate::core::{AutoChoices, MatchInfo, Pose};

/// Substring that marks a line as carrying a structured payload.
pub const RECORD_MARKER: &str = "_Info";

/// Separator between the line prefix and its payload.
const PAYLOAD_SEPARATOR: &str = ": ";

/// Decoded XML element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordNode {
    /// Element name
    pub tag: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child elements
    pub children: Vec<RecordNode>,
    /// Concatenated character data
    pub text: String,
}

impl RecordNode {
    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, name: &'static str) -> Result<&str, RecordError> {
        self.attr(name).ok_or(RecordError::MissingAttribute(name))
    }

    fn number(&self, name: &'static str) -> Result<f64, RecordError> {
        parse_number(name, self.require(name)?)
    }

    fn pose(&self, x: &'static str, y: &'static str, heading: &'static str) -> Result<Pose, RecordError> {
        Ok(Pose::new(self.number(x)?, self.number(y)?, self.number(heading)?))
    }

    /// Decode a payload string into a single-rooted element tree.
    pub fn decode(payload: &str) -> Result<Self, RecordError> {
        let config = ParserConfig::new().trim_whitespace(true);
        let reader = EventReader::new_with_config(payload.as_bytes(), config);

        let mut stack: Vec<RecordNode> = Vec::new();
        let mut root: Option<RecordNode> = None;
        for event in reader {
            match event.map_err(|e| RecordError::Decode(e.to_string()))? {
                XmlEvent::StartElement {
                    name, attributes, ..
                } => {
                    if stack.is_empty() && root.is_some() {
                        return Err(RecordError::Decode("more than one root element".into()));
                    }
                    stack.push(RecordNode {
                        tag: name.local_name,
                        attributes: attributes
                            .into_iter()
                            .map(|a| (a.name.local_name, a.value))
                            .collect(),
                        ..Default::default()
                    });
                }
                XmlEvent::EndElement { .. } => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| RecordError::Decode("unbalanced end tag".into()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => root = Some(node),
                    }
                }
                XmlEvent::Characters(text) | XmlEvent::CData(text) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                XmlEvent::EndDocument => break,
                _ => {}
            }
        }
        root.ok_or_else(|| RecordError::Decode("no root element".into()))
    }
}

fn parse_number(attribute: &'static str, value: &str) -> Result<f64, RecordError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RecordError::InvalidNumber {
            attribute,
            value: value.to_string(),
        })
}

/// A recognized structured record.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `Event name="StateInfo"`: state change with target and measured pose
    StateInfo {
        time: f64,
        state: String,
        target: Pose,
        actual: Pose,
    },
    /// `Event name="RobotPose"`: measured pose only
    RobotPose { time: f64, pose: Pose },
    /// `Info name="MatchInfo"`
    MatchInfo(MatchInfo),
    /// `Info name="AutoChoices"`
    AutoChoices(AutoChoices),
}

impl Record {
    /// Decode the payload of a marker-bearing line.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let (_, payload) = line
            .split_once(PAYLOAD_SEPARATOR)
            .ok_or(RecordError::NoPayload)?;
        Self::from_node(&RecordNode::decode(payload)?)
    }

    /// Interpret a decoded element by tag and `name` attribute.
    ///
    /// Every field is read before anything is returned, so a record with a
    /// bad attribute yields an error and no partial values.
    pub fn from_node(node: &RecordNode) -> Result<Self, RecordError> {
        match (node.tag.as_str(), node.attr("name")) {
            ("Event", Some("StateInfo")) => Ok(Record::StateInfo {
                state: node.require("state")?.to_string(),
                target: node.pose("xTarget", "yTarget", "headingTarget")?,
                actual: node.pose("xPos", "yPos", "heading")?,
                time: node.number("time")?,
            }),
            ("Event", Some("RobotPose")) => {
                let packed = node.require("pose")?;
                let values = scanner::scan_vars(packed, &["x", "y", "angle"])?;
                let pose = Pose::new(
                    parse_number("x", values[0])?,
                    parse_number("y", values[1])?,
                    parse_number("angle", values[2])?,
                );
                Ok(Record::RobotPose {
                    time: node.number("time")?,
                    pose,
                })
            }
            ("Info", Some("MatchInfo")) => Ok(Record::MatchInfo(MatchInfo {
                date: node.require("date")?.to_string(),
                match_type: node.require("type")?.to_string(),
                match_number: node.require("number")?.to_string(),
            })),
            ("Info", Some("AutoChoices")) => Ok(Record::AutoChoices(AutoChoices {
                alliance: node.require("alliance")?.to_string(),
                entries: node
                    .attributes
                    .iter()
                    .filter(|(k, _)| k != "name")
                    .cloned()
                    .collect(),
            })),
            (tag, name) => Err(RecordError::UnknownKind {
                tag: tag.to_string(),
                name: name.map(str::to_string),
            }),
        }
    }

    /// True for pose-bearing events.
    pub fn is_event(&self) -> bool {
        matches!(self, Record::StateInfo { .. } | Record::RobotPose { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;
    use approx::assert_relative_eq;

    #[test]
    fn test_decode_nested_tree() {
        let node =
            RecordNode::decode(r#"<Info name="Extra" a="1"><Child k="v">text</Child></Info>"#)
                .unwrap();
        assert_eq!(node.tag, "Info");
        assert_eq!(node.attr("a"), Some("1"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].attr("k"), Some("v"));
        assert_eq!(node.children[0].text, "text");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(RecordNode::decode("<Event name=\"StateInfo\"").is_err());
        assert!(RecordNode::decode("<a></b>").is_err());
        assert!(RecordNode::decode("").is_err());
        assert!(RecordNode::decode("just words").is_err());
        assert!(RecordNode::decode("<a/><b/>").is_err());
    }

    #[test]
    fn test_state_info() {
        let record = Record::from_line(
            r#"X_Info: <Event name="StateInfo" time="1.5" xPos="1" yPos="2" heading="3" xTarget="10" yTarget="20" headingTarget="30" state="DRIVE"/>"#,
        )
        .unwrap();
        match record {
            Record::StateInfo {
                time,
                state,
                target,
                actual,
            } => {
                assert_relative_eq!(time, 1.5);
                assert_eq!(state, "DRIVE");
                assert_eq!(target, Pose::new(10.0, 20.0, 30.0));
                assert_eq!(actual, Pose::new(1.0, 2.0, 3.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_robot_pose_scans_packed_value() {
        let record = Record::from_line(
            r#"Pose_Info: <Event name="RobotPose" time="2.25" pose="x=1.5, y=-3, angle=90"/>"#,
        )
        .unwrap();
        assert_eq!(
            record,
            Record::RobotPose {
                time: 2.25,
                pose: Pose::new(1.5, -3.0, 90.0)
            }
        );
        assert!(record.is_event());
    }

    #[test]
    fn test_payload_may_contain_separator() {
        let record = Record::from_line(
            r#"Pose_Info: <Event name="RobotPose" time="0" pose="x: 1, y: 2, angle: 3"/>"#,
        )
        .unwrap();
        assert!(matches!(record, Record::RobotPose { .. }));
    }

    #[test]
    fn test_auto_choices_entries() {
        let record = Record::from_line(
            r#"Z_Info: <Info name="AutoChoices" alliance="Blue" start="left" balls="3"/>"#,
        )
        .unwrap();
        let Record::AutoChoices(choices) = record else {
            panic!("expected AutoChoices");
        };
        assert_eq!(choices.alliance, "Blue");
        assert_eq!(choices.get("start"), Some("left"));
        assert_eq!(choices.entries.len(), 3);
        assert_eq!(choices.entries[0], ("alliance".to_string(), "Blue".to_string()));
        assert_eq!(choices.get("name"), None);
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            Record::from_line("X_Info <Event/>"),
            Err(RecordError::NoPayload)
        ));
        assert!(matches!(
            Record::from_line(r#"X_Info: <Event name="Other"/>"#),
            Err(RecordError::UnknownKind { .. })
        ));
        assert!(matches!(
            Record::from_line(r#"X_Info: <Info name="MatchInfo" date="d" type="t"/>"#),
            Err(RecordError::MissingAttribute("number"))
        ));
        assert!(matches!(
            Record::from_line(r#"X_Info: <Event name="RobotPose" time="abc" pose="x=1, y=2, angle=3"/>"#),
            Err(RecordError::InvalidNumber { attribute: "time", .. })
        ));
        assert!(matches!(
            Record::from_line(r#"X_Info: <Event name="RobotPose" time="1" pose="x=1, y=2"/>"#),
            Err(RecordError::Scan(ParseError::VariableNotFound { ref key, .. })) if key == "angle"
        ));
    }
}
