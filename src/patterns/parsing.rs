use nom::{
    IResult, Parser,
    character::complete::multispace0,
    combinator::eof,
    number::complete::double,
    sequence::{delimited, terminated},
};

/// Parses a whole field as a floating point literal, surrounding whitespace allowed.
pub fn parse_float_with_trim(data: &str) -> IResult<&str, f64> {
    terminated(delimited(multispace0, double, multispace0), eof).parse(data)
}

/// Returns the numeric value of a raw field, or `None` if it isn't a finite number.
///
/// `inf` and `nan` are understood by the float parser but are not kept.
pub fn parse_finite_number(data: &str) -> Option<f64> {
    match parse_float_with_trim(data) {
        Ok((_, value)) if value.is_finite() => Some(value),
        _ => None,
    }
}
