use std::io::{BufRead, Write};
use std::path::Path;

use libtof_pipeline::locator::Selection;

/// Ask the operator whether to use the latest source file or name a different one.
///
/// Only an explicit `no` asks for a name; any other answer keeps the latest file.
pub fn choose_source<R: BufRead, W: Write>(
    latest: &Path,
    extension: &str,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Selection> {
    writeln!(
        output,
        "The latest .{extension} file found is: {}",
        latest.display()
    )?;
    write!(output, "Do you want to use the latest file? (yes/no): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if answer.trim().to_lowercase() != "no" {
        return Ok(Selection::Latest);
    }

    write!(
        output,
        "Please enter the name of the .{extension} file you want to use: "
    )?;
    output.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    Ok(Selection::Named(name.trim().to_string()))
}
