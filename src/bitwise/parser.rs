// Parser combinators using nom for number literals and packed BCD bytes

use super::bcd::{decode, BcdError, Result};
use super::width::BcdWidth;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take, take_while1},
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt},
    error::{Error, ErrorKind},
    sequence::preceded,
    IResult, Parser,
};

/// Hexadecimal literal: `0x255`, `0XFF`, `0x0_ff`
fn hex_literal(input: &str) -> IResult<&str, u64> {
    map_res(
        preceded(
            tag_no_case("0x"),
            take_while1(|c: char| c.is_ascii_hexdigit() || c == '_'),
        ),
        |digits: &str| u64::from_str_radix(&digits.replace('_', ""), 16),
    )
    .parse(input)
}

/// Binary literal: `0b0010_0101_0101`
fn bin_literal(input: &str) -> IResult<&str, u64> {
    map_res(
        preceded(
            tag_no_case("0b"),
            take_while1(|c: char| c == '0' || c == '1' || c == '_'),
        ),
        |digits: &str| u64::from_str_radix(&digits.replace('_', ""), 2),
    )
    .parse(input)
}

/// Plain decimal literal
fn dec_literal(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |digits: &str| digits.parse::<u64>()).parse(input)
}

fn literal(input: &str) -> IResult<&str, (Option<char>, u64)> {
    (opt(char('-')), alt((hex_literal, bin_literal, dec_literal))).parse(input)
}

/// Parse an integer literal in decimal, `0x` hex or `0b` binary notation.
///
/// A leading `-` is accepted so that negative inputs reach the encoder's
/// range check instead of failing here.
/// Example: "0x255" -> 597, "-1" -> -1
pub fn parse_literal(text: &str) -> Result<i64> {
    let invalid = || BcdError::InvalidLiteral(text.to_string());

    let (_, (sign, magnitude)) = all_consuming(literal)
        .parse(text.trim())
        .map_err(|_| invalid())?;
    let signed = match sign {
        Some(_) => -(magnitude as i128),
        None => magnitude as i128,
    };

    i64::try_from(signed).map_err(|_| invalid())
}

fn decode_bytes<'a>(
    width: BcdWidth,
    input: &'a [u8],
    bytes: impl Iterator<Item = &'a u8>,
) -> std::result::Result<u64, nom::Err<Error<&'a [u8]>>> {
    let packed = bytes.fold(0u64, |acc, &byte| (acc << 8) | byte as u64);
    decode(width, packed).map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Verify)))
}

/// Parse a packed BCD value (big-endian) sized for `width` and decode it
pub fn parse_packed_be(width: BcdWidth) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        let (rest, bytes) = take::<_, _, Error<&[u8]>>(width.packed_bytes())(input)?;
        let value = decode_bytes(width, input, bytes.iter())?;
        Ok((rest, value))
    }
}

/// Parse a packed BCD value (little-endian) sized for `width` and decode it
pub fn parse_packed_le(width: BcdWidth) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        let (rest, bytes) = take::<_, _, Error<&[u8]>>(width.packed_bytes())(input)?;
        let value = decode_bytes(width, input, bytes.iter().rev())?;
        Ok((rest, value))
    }
}

/// Parse a packed BCD value with selectable endianness
pub fn parse_packed(
    width: BcdWidth,
    little_endian: bool,
) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        if little_endian {
            parse_packed_le(width)(input)
        } else {
            parse_packed_be(width)(input)
        }
    }
}
