use serde::Serialize;
use tabsift_core::error::TabsiftError;

pub fn print<T: Serialize>(value: &T) -> Result<(), TabsiftError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
