//! 同定結果の型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - IdentificationResult: 1枚の画像に対する同定結果
//! - ServiceResponse: Classification Service の応答（成功 or エラー）

use crate::error::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 同定結果
///
/// `image` 以外はすべて表示用文字列。数値や真偽値で返ってきた場合は
/// JSON表記のまま文字列化する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentificationResult {
    #[serde(deserialize_with = "display_string")]
    pub category: String,

    #[serde(deserialize_with = "display_string")]
    pub common_name: String,

    #[serde(deserialize_with = "display_string")]
    pub family_name: String,

    #[serde(deserialize_with = "display_string")]
    pub scientific_name: String,

    #[serde(deserialize_with = "display_string")]
    pub height: String,

    #[serde(deserialize_with = "display_string")]
    pub weight: String,

    #[serde(deserialize_with = "display_string")]
    pub habitat: String,

    #[serde(deserialize_with = "display_string")]
    pub lifespan: String,

    #[serde(deserialize_with = "display_string")]
    pub description: String,

    /// 種の代表画像（URLまたはサーバ上のパス）
    #[serde(deserialize_with = "display_string")]
    pub image: String,
}

impl IdentificationResult {
    /// キー名からフィールド値を取得
    pub fn field_value(&self, key: &str) -> &str {
        match key {
            "category" => &self.category,
            "common_name" => &self.common_name,
            "family_name" => &self.family_name,
            "scientific_name" => &self.scientific_name,
            "height" => &self.height,
            "weight" => &self.weight,
            "habitat" => &self.habitat,
            "lifespan" => &self.lifespan,
            "description" => &self.description,
            "image" => &self.image,
            _ => "",
        }
    }
}

/// Classification Service の応答
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    /// 全フィールドが揃った成功応答
    Identified(IdentificationResult),
    /// `error` を含む応答
    Rejected(String),
}

impl ServiceResponse {
    /// 応答ボディ(JSON)を解釈する
    ///
    /// `error` が空でなければ他のキーに関係なく Rejected。
    /// それ以外は成功フィールドが全て揃っていなければエラー（部分表示はしない）。
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::MalformedResponse("expected a JSON object".into()))?;

        if let Some(message) = object.get("error").and_then(error_text) {
            return Ok(ServiceResponse::Rejected(message));
        }

        let result: IdentificationResult = serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        Ok(ServiceResponse::Identified(result))
    }
}

/// `error` の値が「真」として扱われる場合にその表示文字列を返す
fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn display_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    display_value(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a displayable value, got {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cat_json() -> Value {
        json!({
            "category": "Mammal",
            "common_name": "Cat",
            "family_name": "Felidae",
            "scientific_name": "Felis catus",
            "height": "23-25 cm",
            "weight": "3.6-4.5 kg",
            "habitat": "Domestic",
            "lifespan": "12-18 years",
            "description": "Small carnivorous mammal.",
            "image": "/img/cat.jpg"
        })
    }

    #[test]
    fn test_parse_success() {
        let response = ServiceResponse::parse(&cat_json().to_string()).unwrap();
        match response {
            ServiceResponse::Identified(result) => {
                assert_eq!(result.category, "Mammal");
                assert_eq!(result.scientific_name, "Felis catus");
                assert_eq!(result.image, "/img/cat.jpg");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_wins_over_fields() {
        let mut value = cat_json();
        value["error"] = json!("No species detected");
        let response = ServiceResponse::from_value(value).unwrap();
        assert_eq!(response, ServiceResponse::Rejected("No species detected".into()));
    }

    #[test]
    fn test_error_only() {
        let response = ServiceResponse::parse(r#"{"error": "Invalid image"}"#).unwrap();
        assert_eq!(response, ServiceResponse::Rejected("Invalid image".into()));
    }

    #[test]
    fn test_empty_error_is_ignored() {
        let mut value = cat_json();
        value["error"] = json!("");
        let response = ServiceResponse::from_value(value).unwrap();
        assert!(matches!(response, ServiceResponse::Identified(_)));

        let mut value = cat_json();
        value["error"] = Value::Null;
        assert!(matches!(
            ServiceResponse::from_value(value).unwrap(),
            ServiceResponse::Identified(_)
        ));
    }

    #[test]
    fn test_missing_field_fails_closed() {
        let mut value = cat_json();
        value.as_object_mut().unwrap().remove("habitat");
        let err = ServiceResponse::from_value(value).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.to_string().contains("habitat"));
    }

    #[test]
    fn test_null_field_fails_closed() {
        let mut value = cat_json();
        value["weight"] = Value::Null;
        assert!(ServiceResponse::from_value(value).is_err());
    }

    #[test]
    fn test_numeric_fields_are_displayed() {
        let mut value = cat_json();
        value["lifespan"] = json!(15);
        value["height"] = json!(24.5);
        match ServiceResponse::from_value(value).unwrap() {
            ServiceResponse::Identified(result) => {
                assert_eq!(result.lifespan, "15");
                assert_eq!(result.height, "24.5");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            ServiceResponse::parse("[1, 2, 3]"),
            Err(Error::MalformedResponse(_))
        ));
        assert!(matches!(ServiceResponse::parse("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_field_value_lookup() {
        let result = IdentificationResult {
            common_name: "Cat".into(),
            ..Default::default()
        };
        assert_eq!(result.field_value("common_name"), "Cat");
        assert_eq!(result.field_value("unknown"), "");
    }
}
