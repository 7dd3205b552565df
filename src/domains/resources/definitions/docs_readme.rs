//! Usage documentation for the gear counter.

use super::ResourceDefinition;
use crate::domains::gears::GearEngine;
use crate::domains::resources::error::ResourceError;

/// Markdown usage notes, with the size of the running machine.
pub struct DocsReadmeResource;

impl ResourceDefinition for DocsReadmeResource {
    const URI: &'static str = "gear://docs/readme";
    const NAME: &'static str = "Gear Counter Documentation";
    const DESCRIPTION: &'static str = "How the gear counter adds, subtracts, carries and borrows";
    const MIME_TYPE: &'static str = "text/markdown";

    fn render(engine: &GearEngine) -> Result<String, ResourceError> {
        let gears = engine.gear_count();
        Ok(format!(
            "{}\n## This machine\n\n{} gears, counting from {} to {}.\n",
            DOCUMENTATION,
            gears,
            "0".repeat(gears),
            engine.capacity()
        ))
    }
}

const DOCUMENTATION: &str = r#"# Mechanical Gear Counter

A row of ten-tooth gears, one per decimal digit. The rightmost gear is the
units gear; each gear to its left is worth ten times more.

## Available Tools

- `gear_execute`: add or subtract an amount (1 up to the machine capacity)
- `gear_reset`: turn every gear back to 0
- `gear_state`: read digits, rotations and the status message

## How an operation runs

Gears turn one at a time, starting with the units gear, with a short pause
between gears so the motion can be replayed.

- **Addition** carries: a gear passing 9 rolls over to 0 and pushes the
  next gear forward by one.
- **Subtraction** borrows: a gear passing 0 rolls back to 9 and pulls the
  next gear back by one.

If a carry runs past the last gear the result wraps around and the final
status carries an overflow warning. If a borrow runs past the last gear the
result would be negative: the operation stops with an error and the gears
stay where they stopped. Use `gear_reset` to start over.

Only one operation runs at a time; calls made while the gears are turning
are refused.

## Available Resources

- `gear://state`: current register as JSON
- `gear://docs/readme`: this documentation
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_mention_tools_and_machine_size() {
        let text = DocsReadmeResource::render(&GearEngine::new(4)).unwrap();
        assert!(text.starts_with("# Mechanical Gear Counter"));
        assert!(text.contains("`gear_execute`"));
        assert!(text.ends_with("4 gears, counting from 0000 to 9999.\n"));
    }
}
