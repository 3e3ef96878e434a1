use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::Parser;
use dice_notation::expr::Describe;

/// Max number of individual dice listed in the printed result
const LIST_LIMIT: usize = 100;

fn main() -> ExitCode {
	pretty_env_logger::init();

	let args = env::args();
	let input = if args.len() > 1 {
		// Obtain the expression by combining all args passed to the executable, so that it can be left unquoted
		// even with spaces. The first argument is ignored since it is typically the name of the executable itself.
		args.skip(1).collect::<Vec<String>>().join(" ")
	} else {
		print!("Enter dice expression: ");
		if let Err(err) = io::stdout().flush() {
			eprintln!("Unable to write prompt: {err}");
			return ExitCode::FAILURE;
		}

		// Grab the first line available from stdin
		match io::stdin().lines().next() {
			Some(Ok(line)) => line,
			Some(Err(err)) => {
				eprintln!("Unable to read input: {err}");
				return ExitCode::FAILURE;
			}
			None => {
				eprintln!("No input given");
				return ExitCode::FAILURE;
			}
		}
	};

	log::debug!("input: {input}");

	let expr = match dice_notation::parser().parse(input.as_str()).into_result() {
		Ok(expr) => expr,
		Err(errs) => {
			for err in errs {
				let report = Report::build(ReportKind::Error, err.span().into_range())
					.with_message("Unable to parse dice expression")
					.with_label(
						Label::new(err.span().into_range())
							.with_message(err.reason().to_string())
							.with_color(Color::Red),
					)
					.finish();

				if let Err(io_err) = report.eprint(Source::from(&input)) {
					eprintln!("Parse error: {err} ({io_err})");
				}
			}

			return ExitCode::FAILURE;
		}
	};

	println!("Parsed: {expr}");
	println!("Deterministic: {}", expr.is_deterministic());

	if expr.may_roll_forever() {
		eprintln!("Refusing to roll: an exploding modifier in the expression matches every possible roll");
		return ExitCode::FAILURE;
	}

	let response = expr.roll();
	println!("Rolled: {}", response.describe(Some(LIST_LIMIT)));
	println!("Result: {}", response.result);

	ExitCode::SUCCESS
}
