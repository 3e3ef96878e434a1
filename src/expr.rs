//! AST-like data structures for evaluating full mathematical dice expressions and working with their results.

use alloc::{
	boxed::Box,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

#[cfg(feature = "logging")]
use log::debug;

use crate::dice::{describe_rolls, roller::Roller, Dice, DieRoll};

/// Individual elements of a full mathematical dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Expr {
	/// Standalone integer
	Num(i32),

	/// Dice literal
	Dice(Dice),

	/// Binary operation on two expressions
	Op(Op, Box<Self>, Box<Self>),
}

impl Expr {
	/// Creates a binary operation from two expressions.
	#[must_use]
	pub fn op(op: Op, lhs: Self, rhs: Self) -> Self {
		Self::Op(op, Box::new(lhs), Box::new(rhs))
	}

	/// Evaluates the expression, rolling any dice it contains with the given roller.
	///
	/// The left side of every operation is evaluated before the right side, so a replayable roller produces the same
	/// response every time. The resulting rolls are every die rolled across the whole expression in that order,
	/// including discarded ones. Arithmetic saturates at the bounds of [`i32`].
	///
	/// # Examples
	/// ```
	/// use dice_notation::{dice::roller::Iter as IterRoller, expr::{Expr, Op}, Dice};
	///
	/// // 1d8 + 7 - 2d6 * 3
	/// let expr = Expr::op(
	/// 	Op::Sub,
	/// 	Expr::op(Op::Add, Expr::Dice(Dice::new(1, 8)), Expr::Num(7)),
	/// 	Expr::op(Op::Mul, Expr::Dice(Dice::new(2, 6)), Expr::Num(3)),
	/// );
	/// let response = expr.eval(&mut IterRoller::new([4, 2, 5]));
	/// assert_eq!(response.rolls.iter().map(|roll| roll.val).collect::<Vec<_>>(), [4, 2, 5]);
	/// assert_eq!(response.result, -10);
	/// ```
	pub fn eval(&self, rng: &mut impl Roller) -> Response {
		let response = match self {
			Self::Num(x) => Response {
				rolls: Vec::new(),
				result: *x,
			},
			Self::Dice(dice) => {
				let rolled = rng.roll(dice);
				Response {
					result: rolled.total(),
					rolls: rolled.rolls,
				}
			}
			Self::Op(op, a, b) => {
				let mut lhs = a.eval(rng);
				let mut rhs = b.eval(rng);
				lhs.rolls.append(&mut rhs.rolls);
				Response {
					rolls: lhs.rolls,
					result: op.apply(lhs.result, rhs.result),
				}
			}
		};

		#[cfg(feature = "logging")]
		debug!("evaluated {self} to {}", response.result);

		response
	}

	/// Evaluates the expression using a freshly seeded [`FastRand`](crate::dice::roller::FastRand) roller.
	/// See [`Self::eval()`] for more information.
	#[cfg(all(feature = "fastrand", feature = "std"))]
	#[must_use]
	pub fn roll(&self) -> Response {
		self.eval(&mut crate::dice::roller::FastRand::default())
	}

	/// Checks whether the expression is deterministic (will always yield the same value with every evaluation).
	/// A [`Self::Num`] will always return `true`, a [`Self::Dice`] will only return `true` if it rolls no dice or its
	/// dice only have one side, and operations forward the check to their children.
	#[must_use]
	pub fn is_deterministic(&self) -> bool {
		match self {
			Self::Num(..) => true,
			Self::Dice(dice) => dice.count == 0 || dice.sides == 1,
			Self::Op(_, a, b) => a.is_deterministic() && b.is_deterministic(),
		}
	}

	/// Checks whether evaluating the expression with a uniform roller could keep rolling forever.
	/// See [`Dice::may_roll_forever()`].
	#[must_use]
	pub fn may_roll_forever(&self) -> bool {
		match self {
			Self::Num(..) => false,
			Self::Dice(dice) => dice.may_roll_forever(),
			Self::Op(_, a, b) => a.may_roll_forever() || b.may_roll_forever(),
		}
	}

	/// Gets the binding strength of the expression's outermost element.
	const fn precedence(&self) -> u8 {
		match self {
			Self::Num(..) | Self::Dice(..) => u8::MAX,
			Self::Op(op, ..) => op.precedence(),
		}
	}
}

impl Describe for Expr {
	/// Builds a full usable expression string from the expressions. Operations are grouped with parentheses only where
	/// needed, so re-parsing the string results in the exact same expression layout.
	///
	/// `list_limit` does not affect the output of this implementation in any way since there are no possible lists of
	/// elements included, so it is always safe to pass `None`.
	///
	/// # Examples
	/// ```
	/// use dice_notation::expr::{Describe, Expr, Op};
	///
	/// let expr = Expr::op(Op::Sub, Expr::Num(10), Expr::op(Op::Sub, Expr::Num(4), Expr::Num(1)));
	/// assert_eq!(expr.describe(None), "10 - (4 - 1)");
	///
	/// let expr = Expr::op(Op::Mul, Expr::op(Op::Add, Expr::Num(1), Expr::Num(2)), Expr::Num(3));
	/// assert_eq!(expr.describe(None), "(1 + 2) * 3");
	/// ```
	fn describe(&self, _list_limit: Option<usize>) -> String {
		match self {
			Self::Num(x) => x.to_string(),
			Self::Dice(dice) => dice.to_string(),
			Self::Op(op, a, b) => {
				// Operations are left-associative, so the right side needs grouping on equal precedence too
				let lhs = if a.precedence() < op.precedence() {
					paren_wrap(a.describe(None))
				} else {
					a.describe(None)
				};
				let rhs = if b.precedence() <= op.precedence() {
					paren_wrap(b.describe(None))
				} else {
					b.describe(None)
				};
				format!("{lhs} {op} {rhs}")
			}
		}
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Arithmetic operators usable between expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "The notation only supports these operators")]
pub enum Op {
	/// Sum of two expressions. Symbol: `+`
	Add,

	/// Difference of two expressions. Symbol: `-`
	Sub,

	/// Product of two expressions. Symbol: `*`
	Mul,
}

impl Op {
	/// Applies the operator to two values, saturating at the bounds of [`i32`].
	#[must_use]
	pub const fn apply(self, a: i32, b: i32) -> i32 {
		match self {
			Self::Add => a.saturating_add(b),
			Self::Sub => a.saturating_sub(b),
			Self::Mul => a.saturating_mul(b),
		}
	}

	/// Gets the symbol that represents the operator.
	#[must_use]
	pub const fn symbol(self) -> char {
		match self {
			Self::Add => '+',
			Self::Sub => '-',
			Self::Mul => '*',
		}
	}

	/// Gets the binding strength of the operator. Higher binds tighter.
	#[must_use]
	pub const fn precedence(self) -> u8 {
		match self {
			Self::Add | Self::Sub => 1,
			Self::Mul => 2,
		}
	}
}

impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol())
	}
}

/// Outcome of evaluating an [`Expr`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain result container")]
pub struct Response {
	/// Every die rolled while evaluating, in evaluation order, including discarded ones
	pub rolls: Vec<DieRoll>,

	/// Final result of the expression
	pub result: i32,
}

impl Describe for Response {
	/// Builds a list of all of the individual rolled dice (see [`DieRoll::fmt()`]) followed by the result.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use dice_notation::{dice::DieRoll, expr::{Describe, Response}};
	///
	/// let response = Response {
	/// 	rolls: vec![DieRoll::new(6, 8), DieRoll::new(2, 8).discarded(), DieRoll::new(7, 8)],
	/// 	result: 13,
	/// };
	/// assert_eq!(response.describe(None), "[6, 2 (d), 7] = 13");
	/// assert_eq!(response.describe(Some(1)), "[6, 2 more...] = 13");
	/// ```
	///
	/// [`DieRoll::fmt()`]: crate::dice::DieRoll#method.fmt
	fn describe(&self, list_limit: Option<usize>) -> String {
		format!("{} = {}", describe_rolls(&self.rolls, list_limit), self.result)
	}
}

impl fmt::Display for Response {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed expression string with additional information about non-deterministic elements.
	/// Any elements of the expression that can have a different result between multiple evaluations or multiple results
	/// should list all of the specific individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Wraps a string in parentheses.
#[must_use]
fn paren_wrap(mut text: String) -> String {
	text.insert(0, '(');
	text.push(')');
	text
}
