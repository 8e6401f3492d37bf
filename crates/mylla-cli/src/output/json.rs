use mylla_core::error::MyllaError;

pub fn print<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), MyllaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
