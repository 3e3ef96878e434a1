//! Abstractions for rolling [`DieRoll`]s using various means.

use alloc::{borrow::Cow, vec::Vec};
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;
#[cfg(feature = "logging")]
use log::{debug, trace};

use super::{modifier, Dice, DieRoll, Rolled};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die.
	#[must_use]
	fn roll_die(&mut self, sides: i32) -> DieRoll;

	/// Rolls a set of dice and applies its modifiers to the rolls.
	///
	/// Each die is rolled in turn. A fresh die meeting the reroll condition is discarded and replaced once; otherwise,
	/// if it meets the explode condition, additional dice are rolled after it until one doesn't. The keep/drop
	/// selection is then made over everything rolled.
	fn roll<'d>(&mut self, dice: &'d Dice) -> Rolled<'d>
	where
		Self: Sized,
	{
		let mut rolls = Vec::new();

		for _ in 0..dice.count {
			let roll = self.roll_die(dice.sides);

			#[cfg(feature = "logging")]
			trace!("rolled {} on a d{}", roll.val, dice.sides);

			if dice.reroll.is_some_and(|cond| cond.check(roll.val)) {
				modifier::reroll(roll, self, &mut rolls);
			} else if let Some(cond) = dice.explode.filter(|cond| cond.check(roll.val)) {
				modifier::explode(roll, cond, self, &mut rolls);
			} else {
				rolls.push(roll);
			}
		}

		if let Some(keep) = dice.keep {
			keep.apply(&mut rolls);
		}

		let rolled = Rolled {
			rolls,
			dice: Cow::Borrowed(dice),
		};

		#[cfg(feature = "logging")]
		debug!("rolled {rolled}");

		rolled
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
/// Dice with fewer than one side always roll 0.
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use dice_notation::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|roll| (1..=6).contains(&roll.val)));
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use dice_notation::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// assert_eq!(first, second);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: i32) -> DieRoll {
		if sides > 0 {
			DieRoll::new(self.0.i32(1..=sides), sides)
		} else {
			DieRoll::new(0, sides)
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use dice_notation::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let mut roller = ValRoller(42);
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 42));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub i32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, sides: i32) -> DieRoll {
		DieRoll::new(self.0, sides)
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dice_notation::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let mut roller = MaxRoller;
///
/// let dice = Dice::new(2, 20);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 20));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: i32) -> DieRoll {
		DieRoll::new(sides, sides)
	}
}

/// Generates rolls from an iterator of values, in order. Useful for testing and for replaying earlier rolls.
///
/// # Examples
/// ```
/// use dice_notation::dice::{roller::{Iter as IterRoller, Roller}, Dice, DieRoll};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3]);
/// let dice = Dice::new(3, 6);
/// assert_eq!(
/// 	roller.roll(&dice).rolls,
/// 	vec![DieRoll::new(1, 6), DieRoll::new(2, 6), DieRoll::new(3, 6)]
/// );
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = i32>>(Peekable<I>);

impl<I: Iterator<Item = i32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = i32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, sides: i32) -> DieRoll {
		DieRoll::new(self.0.next().expect("iterator is finished"), sides)
	}
}
