use arrayviz_runner::Pacing;
use pretty_assertions::assert_eq;

use super::*;

fn runner(values: &[i32]) -> Runner {
	Runner::new(Sequence::from(values), Pacing::default(), || 42)
}

async fn transcript(runner: &Runner, source: &str) -> Vec<String> {
	let script = Script::parse(source).unwrap();
	let mut out = Vec::new();
	play(runner, &script, &mut out).await.unwrap();
	String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn parse_every_command() {
	let script = Script::parse("append; pop ;insert -1 7; search 8; clear; traverse; stop; wait 250").unwrap();
	assert_eq!(
		script.steps,
		vec![
			Step::Append,
			Step::Pop,
			Step::Insert {
				index: "-1".to_string(),
				value: "7".to_string(),
			},
			Step::Search("8".to_string()),
			Step::Clear,
			Step::Traverse,
			Step::Stop,
			Step::Wait(Duration::from_millis(250)),
		]
	);
}

#[test]
fn parse_skips_empty_commands() {
	let script = Script::parse(";; append ;\n; ").unwrap();
	assert_eq!(script.steps, vec![Step::Append]);
}

#[test]
fn parse_keeps_raw_insert_fields() {
	let script = Script::parse("insert x y").unwrap();
	assert_eq!(
		script.steps,
		vec![Step::Insert {
			index: "x".to_string(),
			value: "y".to_string(),
		}]
	);
}

#[test]
fn parse_errors() {
	assert_eq!(Script::parse(" ; ").unwrap_err(), ScriptError::Empty);
	assert_eq!(
		Script::parse("append; shuffle").unwrap_err(),
		ScriptError::UnknownCommand {
			position: 2,
			name: "shuffle".to_string(),
		}
	);
	assert_eq!(
		Script::parse("insert 1").unwrap_err(),
		ScriptError::Arity {
			position: 1,
			command: "insert",
			expected: "<index> <value>",
		}
	);
	assert_eq!(
		Script::parse("pop 3").unwrap_err(),
		ScriptError::Arity {
			position: 1,
			command: "pop",
			expected: "no arguments",
		}
	);
	assert_eq!(
		Script::parse("wait soon").unwrap_err(),
		ScriptError::InvalidWait {
			position: 1,
			raw: "soon".to_string(),
		}
	);
}

#[test]
fn error_messages() {
	let err = Script::parse("append; pop; insert 1").unwrap_err();
	assert_eq!(err.to_string(), "command 3: `insert` expects <index> <value>");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn play_append_prints_each_step() {
	let runner = runner(&[1]);
	assert_eq!(
		transcript(&runner, "append").await,
		vec![
			"[1]",
			"[(1)]  append: scanning index 0",
			"[1 +42]  append: placing value at 1",
			"[1 (42)]  append: done",
			"[1 42]",
		]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn play_search_and_clear() {
	let runner = runner(&[1, 2]);
	assert_eq!(
		transcript(&runner, "search 2; search nine; search 2; clear").await,
		vec![
			"[1 2]",
			"[1 *2*]",
			"> search 2: found at index 1",
			"[1 2]",
			"> search nine: not found (-1)",
			"[1 *2*]",
			"> search 2: found at index 1",
			"[1 2]",
		]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn play_reports_refusals_and_errors() {
	let runner = runner(&[]);
	assert_eq!(
		transcript(&runner, "pop; insert 5 1; insert 0 x; stop").await,
		vec![
			"[]",
			"> pop refused: array is empty",
			"> insert 5 1: index 5 is out of bounds, use an index between -1 and 0",
			"> insert 0 x: please enter valid numbers for both value and index",
			"> stop: no traversal running",
		]
	);
	assert!(runner.sequence().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn play_traverse_until_stopped() {
	let runner = runner(&[1, 2, 3]);
	assert_eq!(
		transcript(&runner, "traverse; wait 700; stop").await,
		vec![
			"[1 2 3]",
			"[<1> 2 3]  traverse: visiting index 0",
			"[1 <2> 3]  traverse: visiting index 1",
			"[1 2 3]",
		]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn play_busy_while_traversing() {
	let runner = runner(&[4]);
	let lines = transcript(&runner, "traverse; append").await;
	assert_eq!(lines[2], "> append refused: another operation is running");
	assert_eq!(lines.last().map(String::as_str), Some("[4]"));
	assert_eq!(runner.sequence(), [4]);
}
