use colored::Colorize;
use k2_naming::camel::to_snake_case;

/// Pair every name with its converted form. Blank names are skipped.
pub fn convert(names: &[String]) -> Vec<(String, String)> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| (name.clone(), to_snake_case(name)))
        .collect()
}

pub fn run(names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let converted = convert(names);
    if converted.is_empty() {
        return Err("no names given".into());
    }

    let width = converted.iter().map(|(from, _)| from.len()).max().unwrap_or(0);
    for (from, to) in &converted {
        println!("  {:<width$}  {}  {}", from, "->".dimmed(), to.green());
    }
    Ok(())
}
