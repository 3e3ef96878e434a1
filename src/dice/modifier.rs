//! Dice modifiers and their related types.

use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "logging")]
use log::trace;

use super::{roller::Roller, DieRoll};

/// Routines that can be attached to [`Dice`](super::Dice) to manipulate the rolls produced from them.
///
/// Each variant belongs to exactly one [`Category`], and a set of dice may carry at most one modifier per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "The notation only has these four categories")]
pub enum Modifier {
	/// Keeps or drops the highest or lowest dice (`kh`, `kl`, `dh`, `dl`).
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::Keep, roller::{Iter as IterRoller, Roller}, Dice, DieRoll};
	///
	/// // 4d6kh2 with predetermined rolls: only the two highest remain
	/// let dice = Dice::builder().count(4).sides(6).keep(Keep::Highest(2)).build();
	/// let rolled = IterRoller::new([3, 6, 1, 5]).roll(&dice);
	/// assert_eq!(
	/// 	rolled.rolls,
	/// 	vec![
	/// 		DieRoll::new(3, 6).discarded(),
	/// 		DieRoll::new(6, 6),
	/// 		DieRoll::new(1, 6).discarded(),
	/// 		DieRoll::new(5, 6),
	/// 	]
	/// );
	/// assert_eq!(rolled.total(), 11);
	/// ```
	Keep(Keep),

	/// Rerolls a die once when it meets the condition, discarding the original (`r`, `r<`, `r<=`, `r>`, `r>=`).
	/// The replacement is never rerolled itself.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::Condition, roller::{Iter as IterRoller, Roller}, Dice, DieRoll};
	///
	/// // 3d6r1: the first 1 is replaced by another 1, which stays
	/// let dice = Dice::builder().count(3).sides(6).reroll(Condition::Eq(1)).build();
	/// let rolled = IterRoller::new([1, 1, 4, 2]).roll(&dice);
	/// assert_eq!(
	/// 	rolled.rolls,
	/// 	vec![DieRoll::new(1, 6).discarded(), DieRoll::new(1, 6), DieRoll::new(4, 6), DieRoll::new(2, 6)]
	/// );
	/// assert_eq!(rolled.total(), 7);
	/// ```
	Reroll(Condition),

	/// Adds another die when a die meets the condition, and keeps adding while the newest one does too
	/// (`x`, `x<`, `x<=`, `x>`, `x>=`).
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::Condition, roller::{Iter as IterRoller, Roller}, Dice};
	///
	/// // 2d6x6: the 6 explodes into another 6, which explodes into a 2
	/// let dice = Dice::builder().count(2).sides(6).explode(Condition::Eq(6)).build();
	/// let rolled = IterRoller::new([6, 6, 2, 3]).roll(&dice);
	/// assert_eq!(rolled.rolls.iter().map(|roll| roll.val).collect::<Vec<_>>(), [6, 6, 2, 3]);
	/// assert_eq!(rolled.total(), 17);
	/// ```
	Explode(Condition),

	/// Turns the result into the number of kept dice meeting the condition
	/// (`cs=`, `cs<`, `cs<=`, `cs>`, `cs>=`).
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::{modifier::Condition, roller::{Iter as IterRoller, Roller}, Dice};
	///
	/// let dice = Dice::builder().count(4).sides(10).count_successes(Condition::Gte(7)).build();
	/// let rolled = IterRoller::new([7, 2, 10, 6]).roll(&dice);
	/// assert_eq!(rolled.total(), 2);
	/// ```
	CountSuccesses(Condition),
}

impl Modifier {
	/// Gets the category the modifier belongs to.
	#[must_use]
	pub const fn category(&self) -> Category {
		match self {
			Self::Keep(..) => Category::Keep,
			Self::Reroll(..) => Category::Reroll,
			Self::Explode(..) => Category::Explode,
			Self::CountSuccesses(..) => Category::CountSuccesses,
		}
	}
}

impl fmt::Display for Modifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Keep(keep) => write!(f, "{keep}"),
			Self::Reroll(cond) => write!(f, "r{}", cond.notation("")),
			Self::Explode(cond) => write!(f, "x{}", cond.notation("")),
			Self::CountSuccesses(cond) => write!(f, "cs{}", cond.notation("=")),
		}
	}
}

/// Kinds of [`Modifier`] that are mutually exclusive with themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Mirrors the variants of Modifier")]
pub enum Category {
	/// [`Modifier::Keep`]
	Keep,

	/// [`Modifier::Reroll`]
	Reroll,

	/// [`Modifier::Explode`]
	Explode,

	/// [`Modifier::CountSuccesses`]
	CountSuccesses,
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Keep => "keep/drop",
			Self::Reroll => "reroll",
			Self::Explode => "explode",
			Self::CountSuccesses => "count successes",
		})
	}
}

/// Selection of which dice count towards the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Unlikely to change, no logical fallback")]
pub enum Keep {
	/// Keeps the highest x dice, discarding the rest. Notation: `kh`
	Highest(i32),

	/// Keeps the lowest x dice, discarding the rest. Notation: `kl`
	Lowest(i32),

	/// Discards the highest x dice. Notation: `dh`
	DropHighest(i32),

	/// Discards the lowest x dice. Notation: `dl`
	DropLowest(i32),
}

impl Keep {
	/// Gets the number of dice the selection applies to.
	#[must_use]
	pub const fn count(&self) -> i32 {
		match self {
			Self::Highest(count) | Self::Lowest(count) | Self::DropHighest(count) | Self::DropLowest(count) => *count,
		}
	}

	/// Applies the selection to a set of rolls. Only rolls that haven't already been discarded are considered.
	///
	/// Among rolls with equal values, the one that appears first is selected first. A count larger than the number of
	/// eligible rolls selects all of them, and a count below one selects none.
	pub fn apply(self, rolls: &mut [DieRoll]) {
		let mut eligible = rolls
			.iter()
			.enumerate()
			.filter(|(_, roll)| roll.is_kept())
			.map(|(idx, _)| idx)
			.collect::<Vec<_>>();

		// Stable sorts, so ties stay in roll order
		match self {
			Self::Highest(..) | Self::DropHighest(..) => eligible.sort_by(|&a, &b| rolls[b].val.cmp(&rolls[a].val)),
			Self::Lowest(..) | Self::DropLowest(..) => eligible.sort_by_key(|&idx| rolls[idx].val),
		}

		let selected = eligible.into_iter().take(usize::try_from(self.count()).unwrap_or(0));
		match self {
			Self::Highest(..) | Self::Lowest(..) => {
				rolls.iter_mut().for_each(DieRoll::discard);
				selected.for_each(|idx| rolls[idx].discarded = false);
			}
			Self::DropHighest(..) | Self::DropLowest(..) => selected.for_each(|idx| rolls[idx].discard()),
		}

		#[cfg(feature = "logging")]
		trace!("applied {self} to {} rolls", rolls.len());
	}

	/// Gets the notation prefix for the selection.
	#[must_use]
	pub const fn symbol(&self) -> &'static str {
		match self {
			Self::Highest(..) => "kh",
			Self::Lowest(..) => "kl",
			Self::DropHighest(..) => "dh",
			Self::DropLowest(..) => "dl",
		}
	}
}

impl fmt::Display for Keep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.symbol(), self.count())
	}
}

/// Test that die values can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Unlikely to change, no logical fallback")]
pub enum Condition {
	/// Checks whether values are equal to its own value. Symbol: `=` (omitted for rerolls and explosions)
	Eq(i32),

	/// Checks whether values are less than its own value. Symbol: `<`
	Lt(i32),

	/// Checks whether values are less than or equal to its own value. Symbol: `<=`
	Lte(i32),

	/// Checks whether values are greater than its own value. Symbol: `>`
	Gt(i32),

	/// Checks whether values are greater than or equal to its own value. Symbol: `>=`
	Gte(i32),
}

impl Condition {
	/// Checks a value against the condition.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::modifier::Condition;
	///
	/// assert!(Condition::Lte(2).check(2));
	/// assert!(!Condition::Gt(5).check(5));
	/// ```
	#[must_use]
	pub const fn check(&self, val: i32) -> bool {
		match self {
			Self::Eq(expected) => val == *expected,
			Self::Lt(expected) => val < *expected,
			Self::Lte(expected) => val <= *expected,
			Self::Gt(expected) => val > *expected,
			Self::Gte(expected) => val >= *expected,
		}
	}

	/// Checks whether every value a die with the given number of sides can land on (`1..=sides`) meets the
	/// condition. Dice with fewer than one side can only land on 0.
	///
	/// # Examples
	/// ```
	/// use dice_notation::dice::modifier::Condition;
	///
	/// assert!(Condition::Gte(1).always_holds(20));
	/// assert!(Condition::Eq(1).always_holds(1));
	/// assert!(!Condition::Eq(6).always_holds(6));
	/// ```
	#[must_use]
	pub const fn always_holds(&self, sides: i32) -> bool {
		// Every condition is monotonic or an equality, so checking both ends of the range is enough
		if sides < 1 {
			self.check(0)
		} else {
			self.check(1) && self.check(sides)
		}
	}

	/// Gets the value the condition compares against.
	#[must_use]
	pub const fn val(&self) -> i32 {
		match self {
			Self::Eq(val) | Self::Lt(val) | Self::Lte(val) | Self::Gt(val) | Self::Gte(val) => *val,
		}
	}

	/// Gets the symbol that represents the condition.
	#[must_use]
	pub const fn symbol(&self) -> &'static str {
		match self {
			Self::Eq(..) => "=",
			Self::Lt(..) => "<",
			Self::Lte(..) => "<=",
			Self::Gt(..) => ">",
			Self::Gte(..) => ">=",
		}
	}

	/// Builds the condition's notation, writing equality as `eq_symbol`.
	fn notation(self, eq_symbol: &'static str) -> impl fmt::Display {
		/// Condition paired with the symbol written for equality
		struct Notation(Condition, &'static str);

		impl fmt::Display for Notation {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				let symbol = match self.0 {
					Condition::Eq(..) => self.1,
					cond => cond.symbol(),
				};
				write!(f, "{symbol}{}", self.0.val())
			}
		}

		Notation(self, eq_symbol)
	}
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.symbol(), self.val())
	}
}

/// Discards a freshly rolled die and rolls a single replacement for it.
pub(super) fn reroll(mut roll: DieRoll, rng: &mut impl Roller, rolls: &mut Vec<DieRoll>) {
	let replacement = rng.roll_die(roll.sides);

	#[cfg(feature = "logging")]
	trace!("rerolled {} into {}", roll.val, replacement.val);

	roll.discard();
	rolls.push(roll);
	rolls.push(replacement);
}

/// Keeps a freshly rolled die and adds more rolls for as long as the newest one meets the condition.
pub(super) fn explode(roll: DieRoll, cond: Condition, rng: &mut impl Roller, rolls: &mut Vec<DieRoll>) {
	let sides = roll.sides;
	rolls.push(roll);

	loop {
		let extra = rng.roll_die(sides);
		let again = cond.check(extra.val);

		#[cfg(feature = "logging")]
		trace!("exploded into {}", extra.val);

		rolls.push(extra);
		if !again {
			break;
		}
	}
}
