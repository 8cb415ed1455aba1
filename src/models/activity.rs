/*
Activity is the internal record we persist.
ActivityDto is the shape returned by the random activity API.
*/

use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub participants: Option<i32>,
}

/// Accepts `4`, `"4"`, `""` or `null`. Form inputs post numbers as strings.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i32),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Count::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid participant count '{}'", text))),
    }
}

impl Activity {
    #[cfg(test)]
    pub fn new(name: &str, activity_type: &str, participants: i32) -> Self {
        Activity {
            id: None,
            name: Some(name.to_string()),
            activity_type: Some(activity_type.to_string()),
            participants: Some(participants),
        }
    }

    pub fn with_id(self, id: i64) -> Self {
        Activity { id: Some(id), ..self }
    }
}

/// Matches the random activity API response. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivityDto {
    #[serde(rename = "activity")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub participants: Option<i32>,
}

impl From<ActivityDto> for Activity {
    fn from(dto: ActivityDto) -> Self {
        Activity {
            id: None,
            name: dto.name,
            activity_type: dto.activity_type,
            participants: dto.participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_serializes_type_field() {
        let activity = Activity::new("Go hiking", "recreational", 2).with_id(4);
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "id": 4, "name": "Go hiking", "type": "recreational", "participants": 2 })
        );
    }

    #[test]
    fn activity_without_id_deserializes() {
        let activity: Activity =
            serde_json::from_str(r#"{"name":"Read","type":"education","participants":1}"#).unwrap();
        assert_eq!(activity, Activity::new("Read", "education", 1));
    }

    #[test]
    fn dto_renames_activity_to_name() {
        let dto: ActivityDto = serde_json::from_str(
            r#"{"activity":"Learn to juggle","type":"recreational","participants":1,"price":0.1,"key":"123"}"#,
        )
        .unwrap();
        let activity = Activity::from(dto);
        assert_eq!(activity, Activity::new("Learn to juggle", "recreational", 1));
        assert_eq!(activity.id, None);
    }

    #[test]
    fn participants_accepts_numeric_text() {
        let activity: Activity =
            serde_json::from_str(r#"{"name":"Read","type":"education","participants":"4"}"#).unwrap();
        assert_eq!(activity.participants, Some(4));
    }

    #[test]
    fn participants_blank_or_missing_is_none() {
        let blank: Activity =
            serde_json::from_str(r#"{"name":"","type":"","participants":""}"#).unwrap();
        let null: Activity = serde_json::from_str(r#"{"name":"Read","participants":null}"#).unwrap();
        let missing: Activity = serde_json::from_str(r#"{"name":"Read"}"#).unwrap();

        assert_eq!(blank.participants, None);
        assert_eq!(blank.name.as_deref(), Some(""));
        assert_eq!(null.participants, None);
        assert_eq!(missing.participants, None);
        assert_eq!(missing.activity_type, None);
    }

    #[test]
    fn participants_rejects_non_numeric_text() {
        let result = serde_json::from_str::<Activity>(r#"{"name":"Read","participants":"four"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn dto_participants_accepts_numeric_text() {
        let dto: ActivityDto =
            serde_json::from_str(r#"{"activity":"Nap","type":"relaxation","participants":"2"}"#).unwrap();
        assert_eq!(dto.participants, Some(2));
    }

    #[test]
    fn null_body_is_no_dto() {
        let dto: Option<ActivityDto> = serde_json::from_str("null").unwrap();
        assert!(dto.is_none());
    }
}
