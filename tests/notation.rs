//! End-to-end checks of the public API: parse notation, roll it with predetermined values, and inspect the response.

use dice_notation::{
	dice::{
		roller::{Iter as IterRoller, Max as MaxRoller},
		DieRoll,
	},
	expr::Describe,
	Dice, Expr,
};

fn eval(notation: &str, rolls: impl IntoIterator<Item = i32>) -> dice_notation::Response {
	let expr: Expr = notation.parse().unwrap();
	let mut roller = IterRoller::new(rolls);
	let response = expr.eval(&mut roller);
	assert!(!roller.can_roll(), "{notation} left predetermined rolls unused");
	response
}

#[test]
fn mixed_expression() {
	let response = eval("1d8 + 7 - 2d6 * 3", [4, 2, 5]);
	assert_eq!(response.result, -10);
	assert_eq!(response.to_string(), "[4, 2, 5] = -10");
}

#[test]
fn keep_highest_of_six() {
	let response = eval("6d12kh3", [6, 2, 6, 7, 1, 6]);
	assert_eq!(response.result, 19);
	assert_eq!(response.to_string(), "[6, 2 (d), 6, 7, 1 (d), 6 (d)] = 19");
}

#[test]
fn reroll_is_single_shot() {
	let response = eval("6d12r1", [1, 7, 1, 1, 4, 5, 1, 8, 9]);
	assert_eq!(response.result, 34);
	assert_eq!(response.rolls.iter().filter(|roll| roll.is_discarded()).count(), 3);
	assert_eq!(response.rolls[3], DieRoll::new(1, 12));
}

#[test]
fn explosions_chain() {
	let response = eval("5d12x1", [1, 7, 1, 1, 4, 5, 1, 8, 9]);
	assert_eq!(response.rolls.len(), 9);
	assert_eq!(response.result, 37);
}

#[test]
fn everything_at_once() {
	let response = eval("5d12kh3x8cs>10r10 + 1", [11, 5, 10, 11, 8, 9, 2]);
	assert_eq!(response.result, 3);
	assert_eq!(response.describe(Some(3)), "[11, 5 (d), 10 (d), 4 more...] = 3");
}

#[test]
fn implicit_count() {
	assert_eq!("d20".parse::<Expr>(), "1d20".parse::<Expr>());
	assert_eq!("d20".parse::<Dice>(), Ok(Dice::default()));
}

#[test]
fn rejects_malformed() {
	for input in ["qwe", "4d5f", "4d5 and also something here", "4d5rl5", "r 4d5", "-4d5"] {
		let err = input.parse::<Expr>().unwrap_err();
		assert!(!err.details.is_empty(), "{input:?} produced an empty error");
	}

	for input in ["4d5kh1r2r2", "4d5x5kh2kh3", "4d5cs<=7kh4dl2"] {
		assert!(input.parse::<Expr>().is_err(), "{input:?} has duplicate modifiers");
	}
}

#[test]
fn printed_expressions_parse_back() {
	let expr: Expr = "(d6 + 2) * 3 - 4d6dl1x>=6".parse().unwrap();
	assert_eq!(expr.to_string(), "(1d6 + 2) * 3 - 4d6x>=6dl1");
	assert_eq!(expr.to_string().parse::<Expr>().unwrap(), expr);
}

#[test]
fn infinite_explosions_detected() {
	let expr: Expr = "2d6x>0".parse().unwrap();
	assert!(expr.may_roll_forever());

	let expr: Expr = "2d6x6".parse().unwrap();
	assert!(!expr.may_roll_forever());
	assert_eq!(expr.eval(&mut IterRoller::new([6, 6, 1, 3])).result, 16);
}

#[test]
fn max_rolls() {
	let expr: Expr = "3d8 + 2d4 * 2".parse().unwrap();
	assert_eq!(expr.eval(&mut MaxRoller).result, 40);
	assert!(!expr.is_deterministic());
}
