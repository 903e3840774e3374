use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut envelope = Map::new();
            envelope.insert("success".to_string(), json!(true));
            envelope.insert("message".to_string(), json!(message));

            if let Some(Value::Object(extra)) = data {
                envelope.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(envelope))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let envelope = json!({
                "success": false,
                "message": message
            });
            eprintln!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        OutputFormat::Text => {
            eprintln!("✗ {}", message);
        }
    }
    Ok(())
}
