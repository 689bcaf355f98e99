use std::fmt::Display;

pub(crate) fn write_selector(
    f: &mut std::fmt::Formatter<'_>,
    seq: &[impl Display],
) -> std::fmt::Result {
    let Some(first) = seq.first() else {
        return Ok(());
    };

    write!(f, "{first}")?;

    for elem in &seq[1..] {
        write!(f, ",{elem}")?;
    }

    Ok(())
}

/// Write a group of selectors, separated from what was already written by a
/// space. Return `true` if anything was written.
pub(crate) fn write_group(
    f: &mut std::fmt::Formatter<'_>,
    seq: &[impl Display],
    prefix: &str,
    is_first: bool,
) -> Result<bool, std::fmt::Error> {
    if seq.is_empty() {
        return Ok(false);
    }

    if !is_first {
        write!(f, " ")?;
    }

    write!(f, "{prefix}")?;
    write_selector(f, seq)?;
    Ok(true)
}
