//! Parser generator functions and implementations of [`FromStr`] for all dice and expression data structures.
//! Requires the `parse` feature (enabled by default).
//!
//! The parser generators generate parsers for parsing dice, dice modifiers, and full mathematical dice expressions
//! from strings. They're all constructed using [chumsky] and its combinators.
//!
//! # Notation
//! ```text
//! expr     = term (('+'|'-') term)*
//! term     = factor ('*' factor)*
//! factor   = '(' expr ')' | dice | integer
//! dice     = [unsigned] 'd' integer modifier*
//! modifier = keep | reroll | explode | count
//! keep     = ('kh'|'kl'|'dh'|'dl') integer
//! reroll   = ('r<='|'r>='|'r<'|'r>'|'r') integer
//! explode  = ('x<='|'x>='|'x<'|'x>'|'x') integer
//! count    = ('cs<='|'cs>='|'cs<'|'cs>'|'cs=') integer
//! ```
//! Whitespace is allowed around numbers, dice terms, operators, and parentheses, but not inside a dice term. Modifiers
//! may be given in any order, with at most one of each kind.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::str::FromStr;

use chumsky::prelude::*;

use crate::{
	dice::{
		modifier::{Condition, Keep, Modifier},
		Dice,
	},
	expr::{Expr, Op},
};

/// Notation prefixes of a modifier, each paired with the function building its value from the number that follows
type Notation<T, const N: usize> = [(&'static str, fn(i32) -> T); N];

const KEEP: Notation<Keep, 4> = [
	("kh", Keep::Highest as fn(i32) -> _),
	("kl", Keep::Lowest as fn(i32) -> _),
	("dh", Keep::DropHighest as fn(i32) -> _),
	("dl", Keep::DropLowest as fn(i32) -> _),
];

// Longer prefixes must come before the shorter prefixes they start with
const REROLL: Notation<Condition, 5> = [
	("r<=", Condition::Lte as fn(i32) -> _),
	("r>=", Condition::Gte as fn(i32) -> _),
	("r<", Condition::Lt as fn(i32) -> _),
	("r>", Condition::Gt as fn(i32) -> _),
	("r", Condition::Eq as fn(i32) -> _),
];

const EXPLODE: Notation<Condition, 5> = [
	("x<=", Condition::Lte as fn(i32) -> _),
	("x>=", Condition::Gte as fn(i32) -> _),
	("x<", Condition::Lt as fn(i32) -> _),
	("x>", Condition::Gt as fn(i32) -> _),
	("x", Condition::Eq as fn(i32) -> _),
];

const COUNT_SUCCESSES: Notation<Condition, 5> = [
	("cs<=", Condition::Lte as fn(i32) -> _),
	("cs>=", Condition::Gte as fn(i32) -> _),
	("cs<", Condition::Lt as fn(i32) -> _),
	("cs>", Condition::Gt as fn(i32) -> _),
	("cs=", Condition::Eq as fn(i32) -> _),
];

/// Generates a parser that handles integers with an optional sign, like "42", "-3", or "+7".
pub fn integer<'src>() -> impl Parser<'src, &'src str, i32, extra::Err<Rich<'src, char>>> + Clone {
	one_of("+-")
		.or_not()
		.then(text::int(10))
		.try_map(|(sign, digits): (Option<char>, &str), span| {
			let magnitude = digits
				.parse::<i64>()
				.map_err(|err| Rich::custom(span, format!("Integer: {err}")))?;
			let val = if sign == Some('-') { magnitude.wrapping_neg() } else { magnitude };
			i32::try_from(val).map_err(|err| Rich::custom(span, format!("Integer: {err}")))
		})
}

/// Generates a parser for one category of modifier, trying each of its notation prefixes in order and reading the
/// number after the prefix that matched.
fn notation<'src, T, const N: usize>(
	table: Notation<T, N>,
) -> impl Parser<'src, &'src str, T, extra::Err<Rich<'src, char>>> + Clone
where
	T: 'src,
{
	choice(table.map(|(prefix, make)| just(prefix).to(make)))
		.then(integer())
		.map(|(make, val)| make(val))
}

/// Generates a parser that specifically handles dice modifiers like "kh3", "r<2", "x6", or "cs>=5".
pub fn modifier<'src>() -> impl Parser<'src, &'src str, Modifier, extra::Err<Rich<'src, char>>> + Clone {
	choice((
		notation(KEEP).map(Modifier::Keep),
		notation(REROLL).map(Modifier::Reroll),
		notation(EXPLODE).map(Modifier::Explode),
		notation(COUNT_SUCCESSES).map(Modifier::CountSuccesses),
	))
}

/// Generates a parser that specifically handles dice terms like "d20", "4d6kh3", "8d6x6", etc.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	text::int(10)
		.or_not()
		.then_ignore(just('d'))
		.then(integer())
		.then(modifier().repeated().collect::<Vec<_>>())
		.try_map(|((count, sides), modifiers), span| {
			let count = count
				.unwrap_or("1")
				.parse()
				.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))?;

			Dice::with_modifiers(count, sides, modifiers).map_err(|err| Rich::custom(span, format!("Dice: {err}")))
		})
}

/// Generates a parser that specifically handles dice terms like "d20", "4d6kh3", "8d6x6", etc.
/// and expects end of input
pub fn dice<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	dice_part().then_ignore(end())
}

/// Generates a parser that handles full expressions including mathematical operations, grouping with parentheses,
/// dice terms, etc.
pub fn expr_part<'src>() -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
	// Helper function for operators
	let op = |c| just(c).padded();

	recursive(|expr| {
		// Grouped expressions, then dice, then plain numbers, since dice can start with a number
		let atom = choice((
			expr.delimited_by(just('('), just(')')),
			dice_part().map(Expr::Dice),
			integer().map(Expr::Num),
		))
		.padded();

		// Parser for multiplication
		let product = atom.clone().foldl(
			op('*').to(Op::Mul).then(atom).repeated(),
			|lhs, (op, rhs)| Expr::op(op, lhs, rhs),
		);

		// Parser for addition and subtraction operators
		product.clone().foldl(
			choice((op('+').to(Op::Add), op('-').to(Op::Sub)))
				.then(product)
				.repeated(),
			|lhs, (op, rhs)| Expr::op(op, lhs, rhs),
		)
	})
}

/// Generates a parser that handles full expressions including mathematical operations, grouping with parentheses,
/// dice terms, etc. and expects end of input
pub fn expr<'src>() -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
	expr_part().then_ignore(end())
}

/// Error that can occur while parsing a string into a dice or expression-related structure via [`FromStr`].
/// Holds every problem found, joined into one message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{details}")]
#[non_exhaustive]
pub struct Error {
	/// Details on the parsing error
	pub details: String,
}

impl Error {
	/// Creates a parse error from the diagnostics a parser produced.
	fn from_rich(errs: Vec<Rich<'_, char>>) -> Self {
		Self {
			details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
		}
	}
}

impl FromStr for Dice {
	type Err = Error;

	/// Parses a single dice term such as "4d6kh3".
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::{Condition, Keep}, Dice};
	///
	/// let dice: Dice = "4d6r<2kh3".parse()?;
	/// assert_eq!(dice, Dice::builder().count(4).sides(6).reroll(Condition::Lt(2)).keep(Keep::Highest(3)).build());
	///
	/// assert!("4d6kh1kh2".parse::<Dice>().is_err());
	/// # Ok::<(), dice_notation::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		dice().parse(s).into_result().map_err(Error::from_rich)
	}
}

impl FromStr for Expr {
	type Err = Error;

	/// Parses a full dice expression such as "4d6kh3 + 2d8 - 5".
	///
	/// # Examples
	/// ```
	/// use dice_notation::{dice::roller::Iter as IterRoller, Expr};
	///
	/// let expr: Expr = "2d8 + 3 * (1 - d4)".parse()?;
	/// let response = expr.eval(&mut IterRoller::new([5, 7, 2]));
	/// assert_eq!(response.result, 9);
	///
	/// assert!("4d5 and also something here".parse::<Expr>().is_err());
	/// # Ok::<(), dice_notation::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		expr().parse(s).into_result().map_err(Error::from_rich)
	}
}
