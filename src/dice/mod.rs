//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For using as part of a larger expression, see [`Expr::Dice`].
//!
//! [`Expr::Dice`]: crate::expr::Expr::Dice

pub mod modifier;
pub mod roller;

use alloc::{
	borrow::Cow,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use self::modifier::{Category, Condition, Keep};
pub use self::{modifier::Modifier, roller::Roller};
use crate::expr::Describe;

/// A set of dice with a specific number of sides, along with at most one modifier of each [`Category`] to apply to
/// any resulting rolls from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "One field per modifier category, which are fixed")]
pub struct Dice {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: i32,

	/// Keep/drop selection applied after all dice are rolled
	pub keep: Option<Keep>,

	/// Condition for rerolling a die once
	pub reroll: Option<Condition>,

	/// Condition for exploding a die
	pub explode: Option<Condition>,

	/// Condition for counting a kept die as a success, replacing the sum as the result
	pub count_successes: Option<Condition>,
}

impl Dice {
	/// Creates a new set of dice matching this one but without any modifiers.
	#[must_use]
	#[inline]
	pub const fn plain(&self) -> Self {
		Self::new(self.count, self.sides)
	}

	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u32, sides: i32) -> Self {
		Self {
			count,
			sides,
			keep: None,
			reroll: None,
			explode: None,
			count_successes: None,
		}
	}

	/// Creates a new set of dice with a list of modifiers in any order.
	///
	/// # Errors
	/// If more than one modifier of the same [`Category`] is given, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::{Category, Condition, Keep, Modifier}, Dice, Error};
	///
	/// let dice = Dice::with_modifiers(5, 12, [Modifier::Explode(Condition::Eq(8)), Modifier::Keep(Keep::Highest(3))])?;
	/// assert_eq!(dice.to_string(), "5d12x8kh3");
	///
	/// let dupe = Dice::with_modifiers(4, 6, [Modifier::Keep(Keep::Highest(1)), Modifier::Keep(Keep::DropLowest(2))]);
	/// assert_eq!(dupe, Err(Error::DuplicateModifier(Category::Keep)));
	/// # Ok::<(), Error>(())
	/// ```
	pub fn with_modifiers(count: u32, sides: i32, modifiers: impl IntoIterator<Item = Modifier>) -> Result<Self, Error> {
		let mut dice = Self::new(count, sides);

		for modifier in modifiers {
			let taken = match modifier {
				Modifier::Keep(keep) => dice.keep.replace(keep).is_some(),
				Modifier::Reroll(cond) => dice.reroll.replace(cond).is_some(),
				Modifier::Explode(cond) => dice.explode.replace(cond).is_some(),
				Modifier::CountSuccesses(cond) => dice.count_successes.replace(cond).is_some(),
			};

			if taken {
				return Err(Error::DuplicateModifier(modifier.category()));
			}
		}

		Ok(dice)
	}

	/// Iterates over the dice's modifiers, in the order they are applied.
	pub fn modifiers(&self) -> impl Iterator<Item = Modifier> {
		[
			self.reroll.map(Modifier::Reroll),
			self.explode.map(Modifier::Explode),
			self.keep.map(Modifier::Keep),
			self.count_successes.map(Modifier::CountSuccesses),
		]
		.into_iter()
		.flatten()
	}

	/// Checks whether rolling the dice with a uniform roller could keep exploding forever, since every value a die
	/// can land on meets the explosion condition.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::Condition, Dice};
	///
	/// assert!(Dice::builder().count(2).sides(6).explode(Condition::Gt(0)).build().may_roll_forever());
	/// assert!(!Dice::builder().count(2).sides(6).explode(Condition::Eq(6)).build().may_roll_forever());
	/// ```
	#[must_use]
	pub fn may_roll_forever(&self) -> bool {
		self.count > 0 && self.explode.is_some_and(|cond| cond.always_holds(self.sides))
	}

	/// Creates a new dice builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)?;
		self.modifiers().try_for_each(|modifier| write!(f, "{modifier}"))
	}
}

/// Single die produced from rolling [`Dice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct DieRoll {
	/// Value that was rolled
	pub val: i32,

	/// Number of sides of the die that was rolled
	pub sides: i32,

	/// Whether a modifier has taken this die out of the result
	pub discarded: bool,
}

impl DieRoll {
	/// Creates a new, non-discarded die roll with the given value.
	#[must_use]
	pub const fn new(val: i32, sides: i32) -> Self {
		Self {
			val,
			sides,
			discarded: false,
		}
	}

	/// Marks this die roll as discarded.
	#[inline]
	pub fn discard(&mut self) {
		self.discarded = true;
	}

	/// Creates a discarded copy of this die roll.
	#[must_use]
	#[inline]
	pub const fn discarded(mut self) -> Self {
		self.discarded = true;
		self
	}

	/// Indicates whether this die roll has been discarded by a modifier.
	#[must_use]
	#[inline]
	pub const fn is_discarded(&self) -> bool {
		self.discarded
	}

	/// Indicates whether this die roll still counts towards the result.
	/// This is the direct inverse of [`DieRoll::is_discarded()`].
	#[must_use]
	#[inline]
	pub const fn is_kept(&self) -> bool {
		!self.discarded
	}
}

impl fmt::Display for DieRoll {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The format of a die roll is simply the plain numeric value of the roll.
	/// If the roll was discarded, it is appended with ` (d)`.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::DieRoll;
	///
	/// assert_eq!(DieRoll::new(4, 6).to_string(), "4");
	/// assert_eq!(DieRoll::new(16, 20).discarded().to_string(), "16 (d)");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.val, if self.discarded { " (d)" } else { "" })
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain result container")]
pub struct Rolled<'a> {
	/// Each individual die roll that was made, including discarded ones, in the order they were rolled
	pub rolls: Vec<DieRoll>,

	/// Dice that were rolled to produce this
	pub dice: Cow<'a, Dice>,
}

impl Rolled<'_> {
	/// Calculates the result of the rolls. This is the number of kept rolls meeting the condition if the dice count
	/// successes, otherwise the sum of all kept rolls. Sums saturate at the bounds of [`i32`].
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
	///
	/// let dice = Dice::new(4, 8);
	/// let rolled = FastRandRoller::default().roll(&dice);
	/// assert_eq!(rolled.total(), rolled.rolls.iter().map(|roll| roll.val).sum::<i32>());
	/// ```
	#[must_use]
	pub fn total(&self) -> i32 {
		let kept = self.rolls.iter().filter(|roll| roll.is_kept());

		match self.dice.count_successes {
			Some(cond) => i32::try_from(kept.filter(|roll| cond.check(roll.val)).count()).unwrap_or(i32::MAX),
			None => kept.fold(0_i32, |sum, roll| sum.saturating_add(roll.val)),
		}
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Rolled<'static> {
		Rolled {
			rolls: self.rolls,
			dice: Cow::Owned(self.dice.into_owned()),
		}
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values, none of them discarded.
	#[must_use]
	pub fn from_dice_and_rolls(dice: &Dice, rolls: impl IntoIterator<Item = i32>) -> Rolled {
		Rolled {
			rolls: rolls.into_iter().map(|val| DieRoll::new(val, dice.sides)).collect(),
			dice: Cow::Borrowed(dice),
		}
	}
}

impl Describe for Rolled<'_> {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice
	/// (see [`DieRoll::fmt()`]).
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use std::borrow::Cow;
	/// use dice_notation::{dice::{modifier::Keep, Dice, DieRoll, Rolled}, expr::Describe};
	///
	/// let dice = Dice::builder().count(4).sides(6).keep(Keep::Highest(2)).build();
	/// let rolled = Rolled {
	/// 	rolls: vec![
	/// 		DieRoll::new(6, 6),
	/// 		DieRoll::new(2, 6).discarded(),
	/// 		DieRoll::new(5, 6),
	/// 		DieRoll::new(3, 6).discarded(),
	/// 	],
	/// 	dice: Cow::Borrowed(&dice),
	/// };
	///
	/// assert_eq!(rolled.describe(None), "4d6kh2[6, 2 (d), 5, 3 (d)]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6kh2[6, 2 (d), 2 more...]");
	/// ```
	///
	/// [`DieRoll::fmt()`]: ./struct.DieRoll.html#method.fmt
	fn describe(&self, list_limit: Option<usize>) -> String {
		format!("{}{}", self.dice, describe_rolls(&self.rolls, list_limit))
	}
}

impl fmt::Display for Rolled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Builds a bracketed list of die rolls, truncated to `list_limit` entries.
pub(crate) fn describe_rolls(rolls: &[DieRoll], list_limit: Option<usize>) -> String {
	let list_limit = list_limit.unwrap_or(usize::MAX);
	let truncated_rolls = rolls.len().saturating_sub(list_limit);

	format!(
		"[{}{}]",
		rolls
			.iter()
			.take(list_limit)
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", "),
		if truncated_rolls > 0 {
			format!(", {truncated_rolls} more...")
		} else {
			String::new()
		}
	)
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// More than one modifier of the same category was given for a single set of dice.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::{Category, Condition, Modifier}, Dice, Error};
	///
	/// let dice = Dice::with_modifiers(4, 5, [Modifier::Reroll(Condition::Eq(2)), Modifier::Reroll(Condition::Lt(2))]);
	/// assert!(matches!(dice, Err(Error::DuplicateModifier(Category::Reroll))));
	/// ```
	#[error("more than one {0} modifier")]
	DuplicateModifier(Category),
}

/// Builds [`Dice`] with a fluent interface. Setting a modifier of a category that is already set replaces it.
///
/// # Examples
///
/// ## Basic dice
/// ```
/// use dice_notation::Dice;
///
/// let dice = Dice::builder().count(2).sides(6).build();
/// assert_eq!(dice, Dice::new(2, 6));
/// ```
///
/// ## Multiple modifiers
/// ```
/// use dice_notation::dice::{modifier::{Condition, Keep}, Dice};
///
/// let dice = Dice::builder()
/// 	.count(6)
/// 	.sides(8)
/// 	.reroll(Condition::Eq(1))
/// 	.keep(Keep::Highest(4))
/// 	.build();
/// assert_eq!(
/// 	dice,
/// 	Dice {
/// 		count: 6,
/// 		sides: 8,
/// 		keep: Some(Keep::Highest(4)),
/// 		reroll: Some(Condition::Eq(1)),
/// 		explode: None,
/// 		count_successes: None,
/// 	},
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(Dice);

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: u32) -> Self {
		self.0.count = count;
		self
	}

	/// Sets the number of sides per die.
	#[must_use]
	pub const fn sides(mut self, sides: i32) -> Self {
		self.0.sides = sides;
		self
	}

	/// Sets the keep/drop modifier of the dice.
	#[must_use]
	pub const fn keep(mut self, keep: Keep) -> Self {
		self.0.keep = Some(keep);
		self
	}

	/// Sets the reroll modifier of the dice.
	#[must_use]
	pub const fn reroll(mut self, cond: Condition) -> Self {
		self.0.reroll = Some(cond);
		self
	}

	/// Sets the exploding modifier of the dice.
	#[must_use]
	pub const fn explode(mut self, cond: Condition) -> Self {
		self.0.explode = Some(cond);
		self
	}

	/// Sets the success-counting modifier of the dice.
	#[must_use]
	pub const fn count_successes(mut self, cond: Condition) -> Self {
		self.0.count_successes = Some(cond);
		self
	}

	/// Finalizes the dice.
	#[must_use]
	pub fn build(self) -> Dice {
		self.0
	}
}
