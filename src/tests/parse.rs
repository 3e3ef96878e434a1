use chumsky::Parser;

use crate::{
	dice::{
		modifier::{Condition, Keep, Modifier},
		roller::{Iter as IterRoller, Val as ValRoller},
		Dice,
	},
	expr::{Expr, Op},
	parse, parser,
};

#[test]
fn basic_addition() {
	let ast = parser().parse("42 + 69").unwrap();
	assert_eq!(ast, Expr::op(Op::Add, Expr::Num(42), Expr::Num(69)));
	assert_eq!(ast.eval(&mut ValRoller(0)).result, 111);
}

#[test]
fn basic_subtraction() {
	let ast = parser().parse("42 - 69").unwrap();
	assert_eq!(ast.eval(&mut ValRoller(0)).result, -27);
}

#[test]
fn basic_multiplication() {
	let ast = parser().parse("42 * 69").unwrap();
	assert_eq!(ast.eval(&mut ValRoller(0)).result, 2898);
}

#[test]
fn signed_numbers() {
	let ast = parser().parse("-5 * (3 + 1) - -4").unwrap();
	assert_eq!(ast.eval(&mut ValRoller(0)).result, -16);

	let ast = parser().parse("+7").unwrap();
	assert_eq!(ast, Expr::Num(7));
}

#[test]
fn number_out_of_range() {
	assert!(parser().parse("2147483647").into_result().is_ok());
	assert!(parser().parse("-2147483648").into_result().is_ok());
	assert!(parser().parse("2147483648").into_result().is_err());
	assert!(parser().parse("4d99999999999").into_result().is_err());
}

#[test]
fn precedence() {
	let ast = parser().parse("1d8 + 7 - 2d6 * 3").unwrap();
	assert_eq!(
		ast,
		Expr::op(
			Op::Sub,
			Expr::op(Op::Add, Expr::Dice(Dice::new(1, 8)), Expr::Num(7)),
			Expr::op(Op::Mul, Expr::Dice(Dice::new(2, 6)), Expr::Num(3)),
		)
	);
	assert_eq!(ast.eval(&mut IterRoller::new([4, 2, 5])).result, -10);
}

#[test]
fn left_associative() {
	let ast = parser().parse("10 - 4 - 1").unwrap();
	assert_eq!(
		ast,
		Expr::op(
			Op::Sub,
			Expr::op(Op::Sub, Expr::Num(10), Expr::Num(4)),
			Expr::Num(1)
		)
	);
	assert_eq!(ast.eval(&mut ValRoller(0)).result, 5);
}

#[test]
fn grouping_and_whitespace() {
	let ast = parser().parse("  ( 1 +2 )*  3 ").unwrap();
	assert_eq!(
		ast,
		Expr::op(
			Op::Mul,
			Expr::op(Op::Add, Expr::Num(1), Expr::Num(2)),
			Expr::Num(3)
		)
	);

	let ast = parser().parse("((4d6))").unwrap();
	assert_eq!(ast, Expr::Dice(Dice::new(4, 6)));
}

#[test]
fn implicit_single_die() {
	assert_eq!(parser().parse("d20").unwrap(), parser().parse("1d20").unwrap());
	assert_eq!("d20".parse::<Dice>(), Ok(Dice::new(1, 20)));
}

#[test]
fn plain_dice() {
	let ast = parser().parse("4d8").unwrap();
	assert_eq!(ast, Expr::Dice(Dice::new(4, 8)));
	assert_eq!(ast.eval(&mut IterRoller::new([2, 6, 1, 4])).result, 13);
}

#[test]
fn every_modifier_form() {
	let cases = [
		("kh3", Modifier::Keep(Keep::Highest(3))),
		("kl3", Modifier::Keep(Keep::Lowest(3))),
		("dh3", Modifier::Keep(Keep::DropHighest(3))),
		("dl3", Modifier::Keep(Keep::DropLowest(3))),
		("r1", Modifier::Reroll(Condition::Eq(1))),
		("r<3", Modifier::Reroll(Condition::Lt(3))),
		("r<=3", Modifier::Reroll(Condition::Lte(3))),
		("r>9", Modifier::Reroll(Condition::Gt(9))),
		("r>=9", Modifier::Reroll(Condition::Gte(9))),
		("x1", Modifier::Explode(Condition::Eq(1))),
		("x<3", Modifier::Explode(Condition::Lt(3))),
		("x<=3", Modifier::Explode(Condition::Lte(3))),
		("x>9", Modifier::Explode(Condition::Gt(9))),
		("x>=9", Modifier::Explode(Condition::Gte(9))),
		("cs=1", Modifier::CountSuccesses(Condition::Eq(1))),
		("cs<3", Modifier::CountSuccesses(Condition::Lt(3))),
		("cs<=3", Modifier::CountSuccesses(Condition::Lte(3))),
		("cs>10", Modifier::CountSuccesses(Condition::Gt(10))),
		("cs>=10", Modifier::CountSuccesses(Condition::Gte(10))),
	];

	for (notation, modifier) in cases {
		let parsed = parse::modifier().then_ignore(chumsky::prelude::end()).parse(notation).unwrap();
		assert_eq!(parsed, modifier, "{notation}");
		assert_eq!(modifier.to_string(), notation);

		let dice = format!("6d12{notation}").parse::<Dice>().unwrap();
		assert_eq!(dice, Dice::with_modifiers(6, 12, [modifier]).unwrap());
	}
}

#[test]
fn modifiers_in_any_order() {
	let a = "5d12kh3x8cs>10r10".parse::<Dice>().unwrap();
	let b = "5d12r10cs>10x8kh3".parse::<Dice>().unwrap();
	assert_eq!(a, b);
	assert_eq!(
		a,
		Dice::builder()
			.count(5)
			.sides(12)
			.keep(Keep::Highest(3))
			.explode(Condition::Eq(8))
			.count_successes(Condition::Gt(10))
			.reroll(Condition::Eq(10))
			.build()
	);

	let ast = parser().parse("5d12kh3x8cs>10r10").unwrap();
	assert_eq!(ast.eval(&mut IterRoller::new([11, 5, 10, 11, 8, 9, 2])).result, 2);
}

#[test]
fn dice_in_expressions() {
	let ast = parser().parse("6d12kh3 + 2").unwrap();
	assert_eq!(ast.eval(&mut IterRoller::new([6, 2, 6, 7, 1, 6])).result, 21);

	let ast = parser().parse("6d12r1-1").unwrap();
	assert_eq!(ast.eval(&mut IterRoller::new([1, 7, 1, 1, 4, 5, 1, 8, 9])).result, 33);
}

#[test]
fn malformed_input() {
	let inputs = [
		"",
		"qwe",
		"4d5f",
		"4d5 and also something here",
		"4d5rl5",
		"r 4d5",
		"4d5kh1r2r2",
		"4d5x5kh2kh3",
		"4d5cs<=7kh4dl2",
		"4d6kh1kh2",
		"4d5cs5",
		"-4d5",
		"4d",
		"4 d6",
		"4d6 kh3",
		"1 +",
		"(1 + 2",
		"1 + 2)",
		"2 / 3",
		"4D6",
	];

	for input in inputs {
		assert!(parser().parse(input).into_result().is_err(), "{input:?} should not parse");
		assert!(input.parse::<Expr>().is_err(), "{input:?} should not parse");
	}
}

#[test]
fn display_round_trip() {
	let inputs = [
		"1d8 + 7 - 2d6 * 3",
		"(1 + 2) * 3",
		"10 - (4 - 1)",
		"2 * (3 * 4)",
		"-5 * (3 + 1) - -4",
		"5d12r10x8kh3cs>10 + d4",
		"4d6r<=2x>=6dl1 * (2 - 1d4cs=1)",
	];

	for input in inputs {
		let ast = input.parse::<Expr>().unwrap();
		let printed = ast.to_string();
		assert_eq!(printed.parse::<Expr>().unwrap(), ast, "{input} printed as {printed}");
	}
}

#[test]
fn parsing_is_idempotent() {
	let input = "3d6x6 + 2d4 * 5";
	assert_eq!(parser().parse(input).unwrap(), parser().parse(input).unwrap());
	assert_eq!(input.parse::<Expr>(), input.parse::<Expr>());
}

#[test]
fn dice_parser_rejects_expressions() {
	assert!(parse::dice().parse("4d6 + 1").into_result().is_err());
	assert!(parse::dice().parse("4d6kh3").into_result().is_ok());
}
