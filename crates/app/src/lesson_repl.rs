use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use lesson_core::quiz::OptionMark;
use lesson_core::time::remaining;
use services::{LessonError, LessonLoopService, LessonSession, LessonView, QuizPhase, StepChange};

type Input = Lines<BufReader<Stdin>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Choose(usize),
    Next,
    Previous,
    Restart,
    Quit,
}

fn parse_action(line: &str) -> Option<Action> {
    match line.trim() {
        "n" | "next" => Some(Action::Next),
        "p" | "prev" | "previous" => Some(Action::Previous),
        "r" | "restart" => Some(Action::Restart),
        "q" | "quit" => Some(Action::Quit),
        other => other
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map(Action::Choose),
    }
}

fn mark_prefix(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::Idle | OptionMark::Faded => "  ",
        OptionMark::Selected => "> ",
        OptionMark::Correct => "✓ ",
        OptionMark::Incorrect => "✗ ",
    }
}

fn render(view: &LessonView<'_>) {
    println!();
    println!(
        "── Step {}/{} · {} · score {} ({}%)",
        view.step_index + 1,
        view.step_count,
        view.concept.title(),
        view.score,
        view.progress_percent
    );
    println!("{}", view.concept.explanation());
    if let Some(visual) = view.visual {
        println!("  ({visual})");
    }
    println!();
    match view.tier.badge() {
        Some(badge) => println!("[{} · {badge}] {}", view.tier.heading(), view.question.text()),
        None => println!("[{}] {}", view.tier.heading(), view.question.text()),
    }
    for (index, option) in view.question.options().iter().enumerate() {
        println!("{}{}. {option}", mark_prefix(view.marks[index]), index + 1);
    }
    if let Some(feedback) = view.feedback {
        println!();
        println!("{feedback}");
    }
}

fn render_finished(session: &LessonSession) {
    println!();
    println!("Lesson complete! Mastery score: {}", session.score());
    println!("r = restart, q = quit");
}

fn prompt(session: &LessonSession) {
    let mut hints = Vec::new();
    if session.quiz_phase() == QuizPhase::Pending {
        hints.push(format!(
            "1-{} = {}",
            session.question().options().len(),
            session.tier().submit_label()
        ));
    }
    if session.can_proceed() {
        hints.push("n = next".into());
    }
    if session.can_retreat() {
        hints.push("p = previous".into());
    }
    hints.push("r = restart".into());
    hints.push("q = quit".into());
    println!("{}", hints.join(", "));
}

/// Interactive lesson on stdin/stdout until the learner quits or input ends.
pub async fn run(lesson_loop: &LessonLoopService) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = lesson_loop.start().await?;
    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();

    render(&session.view());
    loop {
        if session.is_finished() {
            render_finished(&session);
        } else {
            prompt(&session);
        }

        let Some(line) = input.next_line().await? else {
            return Ok(());
        };
        let Some(action) = parse_action(&line) else {
            println!("?");
            continue;
        };

        let outcome = match action {
            Action::Quit => return Ok(()),
            Action::Choose(index) => answer(lesson_loop, &mut session, index).await,
            Action::Next => lesson_loop.advance(&mut session).map(|change| {
                if let StepChange::Moved { .. } = change {
                    render(&session.view());
                }
            }),
            Action::Previous => lesson_loop.retreat(&mut session).map(|_| render(&session.view())),
            Action::Restart => {
                lesson_loop.restart(&mut session);
                render(&session.view());
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(LessonError::SkillTree(err)) => return Err(err.into()),
            Err(err) => println!("{err}"),
        }
    }
}

async fn answer(
    lesson_loop: &LessonLoopService,
    session: &mut LessonSession,
    index: usize,
) -> Result<(), LessonError> {
    session.select_option(index)?;
    let result = lesson_loop.check_answer(session).await?;
    render(&session.view());

    if let Some(pending) = result.effect.scheduled {
        tokio::time::sleep(remaining(lesson_loop.clock().now(), pending.due_at)).await;
        if lesson_loop.fire(session, pending.ticket).is_some() {
            render(&session.view());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_one_based_options() {
        assert_eq!(parse_action("1"), Some(Action::Choose(0)));
        assert_eq!(parse_action(" 4 "), Some(Action::Choose(3)));
        assert_eq!(parse_action("0"), None);
        assert_eq!(parse_action("n"), Some(Action::Next));
        assert_eq!(parse_action("previous"), Some(Action::Previous));
        assert_eq!(parse_action("x"), None);
    }
}
