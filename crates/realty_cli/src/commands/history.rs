//! History command implementation.

use realty_core::{format_currency, Estate};

/// Runs the history command.
pub fn run(estate: &Estate, code: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let service = estate.properties();
    let details = service.get_by_code(code)?;
    let traces = service.property_history(details.property.id())?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&traces)?),
        _ => {
            println!("{} ({})", details.property.name, details.property.code_internal);
            for trace in &traces {
                println!(
                    "  {}  {:<16} {:>16}  {}",
                    trace.event_date.format("%Y-%m-%d %H:%M"),
                    trace.name,
                    format_currency(trace.value),
                    trace.description.as_deref().unwrap_or(""),
                );
            }
        }
    }
    Ok(())
}
