use std::io::Read;

use anyhow::Context;
use serde_json::{Map, Value};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::shared::PayloadArgs;

/// Split repeated `KEY=VALUE` flags into query pairs.
pub fn parse_params(raw: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("invalid --param '{pair}': expected KEY=VALUE"))?;
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("invalid --param '{pair}': empty key");
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Read the JSON object given via `--data` or `--file`.
pub fn read_payload(args: &PayloadArgs) -> anyhow::Result<Map<String, Value>> {
    let text = match (&args.data, &args.file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read payload from stdin")?;
            buffer
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload file {}", path.display()))?,
        (None, None) => anyhow::bail!("a payload is required: pass --data or --file"),
    };
    parse_object(&text)
}

fn parse_object(text: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).context("payload is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("payload must be a JSON object, got {}", kind_of(&other)),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// An explicit id argument, else the selected exam.
pub fn exam_id(explicit: Option<&str>, flags: &GlobalFlags) -> anyhow::Result<String> {
    match explicit.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(id.to_string()),
        None => flags.require_exam().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(exam: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            exam: exam.map(String::from),
        }
    }

    #[test]
    fn params_split_on_first_equals() {
        let parsed = parse_params(&["type=school".into(), "filter=a=b".into()]).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("type".to_string(), "school".to_string()),
                ("filter".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn params_without_equals_are_rejected() {
        let err = parse_params(&["limit".into()]).unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));
        assert!(parse_params(&["=10".into()]).is_err());
    }

    #[test]
    fn inline_payload_must_be_an_object() {
        let args = PayloadArgs {
            data: Some(r#"{"exam_name": "Mock", "exam_level": "O-LEVEL"}"#.into()),
            file: None,
        };
        let map = read_payload(&args).unwrap();
        assert_eq!(map.get("exam_name"), Some(&json!("Mock")));

        let array = PayloadArgs {
            data: Some("[1, 2]".into()),
            file: None,
        };
        let err = read_payload(&array).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn payload_file_is_read() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("board.json");
        std::fs::write(&path, r#"{"name": "NECTA"}"#).unwrap();

        let map = read_payload(&PayloadArgs {
            data: None,
            file: Some(path),
        })
        .unwrap();
        assert_eq!(map.get("name"), Some(&json!("NECTA")));

        let missing = read_payload(&PayloadArgs {
            data: None,
            file: Some(PathBuf::from("/no/such/payload.json")),
        });
        assert!(missing.is_err());
    }

    #[test]
    fn explicit_id_wins_over_selection() {
        assert_eq!(exam_id(Some("e2"), &flags(Some("e1"))).unwrap(), "e2");
        assert_eq!(exam_id(None, &flags(Some("e1"))).unwrap(), "e1");
        assert_eq!(exam_id(Some("  "), &flags(Some("e1"))).unwrap(), "e1");
        assert!(exam_id(None, &flags(None)).is_err());
    }
}
