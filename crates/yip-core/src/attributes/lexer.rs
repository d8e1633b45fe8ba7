//! Small `nom` combinators shared by the resolvers.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, tuple},
    IResult,
};

/// Parse a decimal number (integer or float, optionally signed).
pub fn number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(tuple((
            opt(nom::branch::alt((char('-'), char('+')))),
            take_while1(|c: char| c.is_ascii_digit()),
            opt(pair(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
        ))),
        |s: &str| s.parse::<f32>(),
    )(input)
}

/// A comma, with optional whitespace around it.
fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

/// Parse the whole input as a comma-separated list of numbers.
pub fn number_list(input: &str) -> Option<Vec<f32>> {
    all_consuming(delimited(
        multispace0,
        separated_list1(comma, number),
        multispace0,
    ))(input)
    .ok()
    .map(|(_, values)| values)
}

/// Split the input on commas, trimming each part. Empty parts are kept so
/// callers can reject them.
pub fn split_list(input: &str) -> Vec<&str> {
    input.split(',').map(str::trim).collect()
}
