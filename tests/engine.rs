//! Tests for the step-by-step behaviour of a session.
mod common;
use common::*;
use flowrun::engine::{END_MARKER, START_MARKER};
use flowrun::prelude::*;
use flowrun::program::samples;

#[test]
fn test_first_step_emits_start_marker() {
    let mut session = Session::new(build(single_process("x = 1")));
    assert_eq!(session.status(), Status::NotStarted);
    assert_eq!(session.current_node(), None);

    let outcome = session.step();
    assert_eq!(
        outcome,
        StepOutcome::Started {
            entry: 0,
            next: Some(1)
        }
    );
    assert_eq!(session.status(), Status::Running);
    assert_eq!(session.current_node(), Some(1));
    assert_eq!(session.output(), [START_MARKER]);
    assert_eq!(session.step_count(), 1);
}

#[test]
fn test_process_then_end() {
    let mut session = Session::new(build(single_process("x = 2 * 21")));
    session.step();
    assert_eq!(
        session.step(),
        StepOutcome::Advanced {
            from: 1,
            next: Some(2)
        }
    );
    assert_eq!(session.variable("x"), Some(&Value::Number(42.0)));
    assert_eq!(session.step(), StepOutcome::Finished { node: 2 });
    assert_eq!(session.status(), Status::Completed);
    assert_eq!(session.output(), [START_MARKER, END_MARKER]);
    assert_eq!(session.current_node(), Some(2));
}

#[test]
fn test_steps_after_finish_do_nothing() {
    let mut session = Session::new(build(single_process("x = 1")));
    run_to_end(&mut session);
    let before = session.snapshot();

    assert_eq!(session.step(), StepOutcome::Idle);
    assert_eq!(session.resume("5"), StepOutcome::Idle);
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_decision_reports_reason() {
    let mut session = Session::new(build(samples::sum_one_to_five()));
    session.step();
    session.step();
    assert_eq!(
        session.step(),
        StepOutcome::Branched {
            from: 2,
            outcome: true,
            taken: Some(Branch::Yes),
            fallback: false,
            next: Some(3),
            reason: "i (was 1) <= 5".to_string(),
        }
    );
}

fn decision_program(condition: &str, edges: Vec<EdgeDefinition>) -> FlowGraph {
    build(ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "start", "START", ""),
            NodeDefinition::new(1, "decision", "CHECK", condition),
            NodeDefinition::new(2, "process", "YES", "path = \"yes\""),
            NodeDefinition::new(3, "process", "NO", "path = \"no\""),
        ],
        edges,
    })
}

#[test]
fn test_decision_follows_matching_tag() {
    let edges = || {
        vec![
            EdgeDefinition::new(0, 1),
            EdgeDefinition::labelled(1, 2, "Y"),
            EdgeDefinition::labelled(1, 3, "N"),
        ]
    };

    let mut session = Session::new(decision_program("1 > 2", edges()));
    run_to_end(&mut session);
    assert_eq!(session.variable("path"), Some(&Value::from("no")));

    let mut session = Session::new(decision_program("2 > 1", edges()));
    run_to_end(&mut session);
    assert_eq!(session.variable("path"), Some(&Value::from("yes")));
}

#[test]
fn test_decision_falls_back_to_first_edge() {
    let edges = vec![EdgeDefinition::new(0, 1), EdgeDefinition::labelled(1, 2, "Y")];
    let mut session = Session::new(decision_program("1 > 2", edges));
    session.step();

    let outcome = session.step();
    assert!(matches!(
        outcome,
        StepOutcome::Branched {
            outcome: false,
            taken: Some(Branch::Yes),
            fallback: true,
            next: Some(2),
            ..
        }
    ));
}

#[test]
fn test_decision_with_untagged_edges_and_empty_body() {
    let edges = vec![
        EdgeDefinition::new(0, 1),
        EdgeDefinition::new(1, 3),
        EdgeDefinition::new(1, 2),
    ];
    let mut session = Session::new(decision_program("   ", edges));
    session.step();

    match session.step() {
        StepOutcome::Branched {
            outcome,
            taken,
            fallback,
            next,
            reason,
            ..
        } => {
            assert!(!outcome);
            assert_eq!(taken, None);
            assert!(fallback);
            assert_eq!(next, Some(3));
            assert_eq!(reason, "empty condition");
        }
        other => panic!("expected a branch, got {:?}", other),
    }
}

#[test]
fn test_no_outgoing_edge_completes() {
    let edges = vec![EdgeDefinition::new(0, 1)];
    let mut session = Session::new(decision_program("1", edges));
    session.step();

    let outcome = session.step();
    assert!(matches!(outcome, StepOutcome::Branched { next: None, .. }));
    assert_eq!(session.status(), Status::Completed);
    assert_eq!(session.current_node(), None);
    assert_eq!(session.output(), [START_MARKER]);
}

#[test]
fn test_start_without_successor_completes_immediately() {
    let graph = build(ProgramDefinition {
        nodes: vec![NodeDefinition::new(0, "start", "START", "")],
        edges: vec![],
    });
    let mut session = Session::new(graph);
    assert_eq!(
        session.step(),
        StepOutcome::Started {
            entry: 0,
            next: None
        }
    );
    assert!(session.is_finished());
}

#[test]
fn test_evaluation_fault_fails_session() {
    let mut session = Session::new(build(single_process("a = 1; x = 1 / 0; b = 2")));
    session.step();

    let outcome = session.step();
    let expected = ExecutionError::Evaluation {
        label: "PROC".to_string(),
        source: EvaluationError::DivisionByZero { operation: "/" },
    };
    assert_eq!(outcome, StepOutcome::Failed(expected.clone()));
    assert_eq!(session.status(), Status::Failed);
    assert_eq!(session.error(), Some(&expected));
    assert_eq!(session.current_node(), Some(1));
    assert_eq!(session.variable("a"), Some(&Value::Number(1.0)));
    assert_eq!(session.variable("b"), None);
    assert_eq!(session.output(), [START_MARKER]);

    assert_eq!(session.step(), StepOutcome::Idle);
    assert_eq!(session.step_count(), 2);
}

#[test]
fn test_fault_on_unlabelled_node_names_its_id() {
    let mut definition = single_process("y = nothing");
    definition.nodes[1].label = String::new();
    let mut session = Session::new(build(definition));
    run_to_end(&mut session);
    assert_eq!(
        session.error().map(ToString::to_string).as_deref(),
        Some("ERROR at \"#1\": Variable 'nothing' is not defined")
    );
}

#[test]
fn test_broken_link() {
    let definition = ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "start", "START", ""),
            NodeDefinition::new(1, "process", "P", "x = 1"),
        ],
        edges: vec![EdgeDefinition::new(0, 1), EdgeDefinition::new(1, 99)],
    };
    let mut session = Session::new(build(definition));
    session.step();
    assert_eq!(
        session.step(),
        StepOutcome::Advanced {
            from: 1,
            next: Some(99)
        }
    );
    assert_eq!(
        session.step(),
        StepOutcome::Failed(ExecutionError::BrokenLink { node_id: 99 })
    );
}

#[test]
fn test_max_steps_exceeded() {
    let mut session = Session::builder(build(endless_loop())).max_steps(20).build();
    let outcomes = run_to_end(&mut session);

    assert_eq!(outcomes.len(), 21);
    assert_eq!(
        outcomes.last(),
        Some(&StepOutcome::Failed(ExecutionError::MaxStepsExceeded { limit: 20 }))
    );
    assert_eq!(session.status(), Status::Failed);
    assert_eq!(session.step_count(), 21);
}

#[test]
fn test_default_step_limit() {
    let session = Session::new(build(endless_loop()));
    assert_eq!(session.config().max_steps, 500);
    assert_eq!(EngineConfig::default().max_steps, 500);

    let mut session = Session::new(build(endless_loop()));
    run_to_end(&mut session);
    assert_eq!(session.step_count(), 501);
}

#[test]
fn test_suspend_and_resume() {
    let mut session = Session::new(build(samples::greeting()));
    session.step();

    assert_eq!(
        session.step(),
        StepOutcome::Suspended {
            node: 1,
            prompt: "Enter name:".to_string()
        }
    );
    assert_eq!(session.status(), Status::WaitingForInput);
    assert_eq!(
        session.pending_input(),
        Some(&PendingInput {
            prompt: "Enter name:".to_string(),
            variable: "name".to_string(),
        })
    );

    // Stepping without an answer changes nothing.
    assert_eq!(session.step(), StepOutcome::Idle);
    assert_eq!(session.step_count(), 2);

    assert_eq!(
        session.resume("Ada"),
        StepOutcome::Resumed {
            variable: "name".to_string(),
            value: Value::from("Ada"),
            next: Some(2)
        }
    );
    assert_eq!(session.pending_input(), None);
    assert_eq!(session.status(), Status::Running);
}

#[test]
fn test_resume_coerces_numbers() {
    let mut session = Session::new(build(ask_and_show(
        r#"input("Age?", age)"#,
        "print(age * 2)",
    )));
    session.step();
    session.step();
    session.resume(" 21 ");
    run_to_end(&mut session);

    assert_eq!(session.variable("age"), Some(&Value::Number(21.0)));
    assert_eq!(
        session.output(),
        [START_MARKER, "Age?", ">  21 ", "42", END_MARKER]
    );
}

#[test]
fn test_resume_keeps_text() {
    let mut session = Session::new(build(ask_and_show("input()", "print(x + 1)")));
    session.step();
    session.step();
    session.resume("foo");
    run_to_end(&mut session);

    assert_eq!(session.variable("x"), Some(&Value::from("foo")));
    assert!(session.output().contains(&"foo1".to_string()));
    assert!(session.output().contains(&"INPUT:".to_string()));
}

#[test]
fn test_value_ignored_when_not_waiting() {
    let mut session = Session::new(build(single_process("x = 1")));
    assert!(matches!(session.resume("7"), StepOutcome::Started { .. }));
    session.resume("7");
    assert_eq!(session.variable("x"), Some(&Value::Number(1.0)));
    assert_eq!(session.environment().len(), 1);
}

#[test]
fn test_io_node_without_directive_runs_statements() {
    let mut session = Session::new(build(ask_and_show("shown = 1", "print(\"plain\")")));
    run_to_end(&mut session);
    assert_eq!(session.status(), Status::Completed);
    assert_eq!(session.output(), [START_MARKER, "plain", END_MARKER]);
}

#[test]
fn test_reset() {
    let mut session = Session::builder(build(samples::sum_one_to_five()))
        .max_steps(50)
        .build();
    run_to_end(&mut session);
    let first = session.snapshot();

    session.reset();
    assert_eq!(session.status(), Status::NotStarted);
    assert!(session.output().is_empty());
    assert!(session.environment().is_empty());
    assert_eq!(session.step_count(), 0);
    assert_eq!(session.current_node(), None);
    assert_eq!(session.config().max_steps, 50);

    run_to_end(&mut session);
    assert_eq!(session.snapshot(), first);
}

#[test]
fn test_reset_clears_failure() {
    let mut session = Session::builder(build(endless_loop())).max_steps(5).build();
    run_to_end(&mut session);
    assert!(session.error().is_some());

    session.reset();
    assert!(session.error().is_none());
    assert_eq!(session.step(), StepOutcome::Started { entry: 0, next: Some(1) });
}

#[test]
fn test_console_mirror_receives_every_line() {
    let mirror = SharedConsole::default();
    let mut session = Session::builder(build(samples::greeting()))
        .with_console(Box::new(mirror.clone()))
        .build();
    session.step();
    session.step();
    session.resume("Grace");
    run_to_end(&mut session);

    assert_eq!(*mirror.0.borrow(), session.output());
}

#[test]
fn test_deeply_nested_body_fails_session() {
    let body = format!("x = {}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let mut session = Session::new(build(single_process(&body)));
    session.step();

    let outcome = session.step();
    assert!(matches!(
        &outcome,
        StepOutcome::Failed(ExecutionError::Evaluation {
            label,
            source: EvaluationError::Parse(_),
        }) if label == "PROC"
    ));
    assert_eq!(session.status(), Status::Failed);
}

#[test]
fn test_unquoted_input_directive_suspends() {
    let mut session = Session::new(build(ask_and_show(
        "input(Enter name, name)",
        r#"print("Hi " + name)"#,
    )));
    session.step();
    assert_eq!(
        session.step(),
        StepOutcome::Suspended {
            node: 1,
            prompt: "Enter name".to_string()
        }
    );
    session.resume("Ada");
    run_to_end(&mut session);
    assert_eq!(session.status(), Status::Completed);
    assert!(session.output().contains(&"Hi Ada".to_string()));
}
