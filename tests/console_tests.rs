//! Integration tests for Console

mod common;
use common::*;

use led_chaser::{
    Command, CommandError, Console, FrequencyTier, OutputState, Pattern, PatternError, PatternId,
    PushOutcome, Reply, RxBuffer, TickSignal,
};

const OK_PROMPT: &str = "STM32> ";

fn status_block(leds: [&str; 3], pattern_line: &str) -> String {
    format!(
        "--- Statut ---\r\nLED 1: {}\r\nLED 2: {}\r\nLED 3: {}\r\n{}\r\n",
        leds[0], leds[1], leds[2], pattern_line
    )
}

// ============================================================================
// Session Flow
// ============================================================================

#[test]
fn banner_ends_with_prompt() {
    let ticks = TickSignal::new();
    let console = console(&ticks);

    let mut out = String::new();
    console.banner(&mut out);
    assert!(out.starts_with("--= LED chaser console =--\r\n"));
    assert!(out.ends_with(OK_PROMPT));
}

#[test]
fn pattern_session_end_to_end() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    assert_eq!(send(&mut console, "PAT2\r"), "[OK] Chenillard 2 active\r\nSTM32> ");
    assert_eq!(console.poll(), Some(0));

    assert_eq!(
        send(&mut console, "STATUS\r"),
        status_block(["ON", "OFF", "ON"], "Chenillard: ACTIF (Pattern: 2, Freq: 1S)") + OK_PROMPT
    );

    assert_eq!(
        send(&mut console, "LED1 ON\r"),
        "[ERR] Impossible de changer LED (pattern actif?)\r\nSTM32> "
    );

    assert_eq!(send(&mut console, "STOP\r"), "[OK] Chenillard arrete\r\nSTM32> ");
    assert_eq!(console.engine().outputs().states(), [OutputState::Off; 3]);

    assert_eq!(
        send(&mut console, "STOP\r"),
        "[OK] Aucun chenillard actif a arreter\r\nSTM32> "
    );
}

#[test]
fn direct_output_control() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    assert_eq!(send(&mut console, "LED2 ON\r"), "[OK] LED 2 mise a ON\r\nSTM32> ");
    assert_eq!(send(&mut console, "LED2 OFF\r"), "[OK] LED 2 mise a OFF\r\nSTM32> ");
    assert_eq!(send(&mut console, "LED3 ON\r"), "[OK] LED 3 mise a ON\r\nSTM32> ");

    assert_eq!(
        send(&mut console, "STATUS\r"),
        status_block(["OFF", "OFF", "ON"], "Chenillard: INACTIF (Freq select: 1S)") + OK_PROMPT
    );
    assert_eq!(console.engine().outputs().driver().lit(), [false, false, true]);
}

#[test]
fn frequency_selection_while_idle() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    assert_eq!(send(&mut console, "FREQ3\r"), "[OK] Frequence reglee a 3S\r\nSTM32> ");
    assert_eq!(
        send(&mut console, "CHENILLARD FREQUENCE1\r"),
        "[OK] Frequence reglee a 500MS\r\nSTM32> "
    );

    let status = send(&mut console, "STATUS\r");
    assert!(status.contains("Chenillard: INACTIF (Freq select: 500MS)\r\n"));

    send(&mut console, "CHENILLARD3 ON\r");
    assert_eq!(console.engine().active(), Some(Pattern::Fill));
    assert_eq!(console.engine().timer().running(), &[FrequencyTier::Fast]);
}

#[test]
fn frequency_change_while_running_keeps_pattern() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    send(&mut console, "PAT1\r");
    console.poll();
    ticks.on_tick(FrequencyTier::Normal);
    console.poll();

    assert_eq!(send(&mut console, "FREQ1\r"), "[OK] Frequence reglee a 500MS\r\nSTM32> ");
    assert_eq!(console.engine().step(), 2);

    ticks.on_tick(FrequencyTier::Fast);
    assert_eq!(console.poll(), Some(2));
    assert_eq!(console.engine().outputs().driver().lit(), [false, false, true]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn each_rejected_line_gets_one_error() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    let cases = [
        ("LED4 ON\r", "Numero LED invalide (1-3)"),
        ("LED1\r", "Format LED invalide (trop court)"),
        ("LED1:ON\r", "Format LED invalide (espace manquant)"),
        ("LED1 MAYBE\r", "Etat LED invalide (ON/OFF attendu)"),
        ("CHENILLARD7 ON\r", "Numero chenillard invalide (1-3)"),
        ("CHENILLARD FREQUENCE\r", "Format Frequence invalide"),
        ("CHENILLARD FREQUENCE9\r", "Numero Frequence invalide (1-3)"),
        ("PAT0\r", "Numero PAT invalide (1-3)"),
        ("FREQ4\r", "Numero FREQ invalide (1-3)"),
        ("PAT10\r", "Raccourci invalide"),
        ("HELLO\r", "Commande inconnue ou format invalide"),
    ];

    for (line, message) in cases {
        assert_eq!(
            send(&mut console, line),
            format!("[ERR] {message}\r\nSTM32> "),
            "line {line:?}"
        );
    }
    assert!(!console.engine().is_active());
}

#[test]
fn execute_rejects_commands_built_outside_the_parser() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    let err = console.execute(Command::StartPattern(PatternId(7))).unwrap_err();
    assert_eq!(err, CommandError::Pattern(PatternError::InvalidPattern(PatternId(7))));

    let mut out = String::new();
    err.write_to(&mut out).unwrap();
    assert_eq!(out, "[ERR] Impossible de demarrer chenillard\r\n");
    assert!(!console.engine().is_active());

    assert_eq!(console.execute(Command::Stop), Ok(Reply::NothingToStop));
}

#[test]
fn rejected_start_leaves_running_pattern_alone() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    send(&mut console, "PAT2\r");
    send(&mut console, "PAT5\r");
    assert_eq!(console.engine().active(), Some(Pattern::Alternate));
}

// ============================================================================
// Line Handling
// ============================================================================

#[test]
fn empty_lines_produce_no_output() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    assert_eq!(send(&mut console, "\r"), "");
    assert_eq!(send(&mut console, "\r\n\r\n"), "");
    assert_eq!(send(&mut console, "\n"), "");
}

#[test]
fn lower_case_is_accepted() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    assert_eq!(send(&mut console, "led1 on\r"), "[OK] LED 1 mise a ON\r\nSTM32> ");
    assert_eq!(send(&mut console, "Pat3\r"), "[OK] Chenillard 3 active\r\nSTM32> ");
}

#[test]
fn crlf_terminated_lines_behave_like_cr() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    let out = send(&mut console, "LED1 ON\r\nLED2 ON\r\n");
    assert_eq!(out, "[OK] LED 1 mise a ON\r\nSTM32> [OK] LED 2 mise a ON\r\nSTM32> ");
}

#[test]
fn backspace_edits_the_line() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);

    assert_eq!(
        send(&mut console, "LEDX\x081 OF\x7fN\r"),
        "[OK] LED 1 mise a ON\r\nSTM32> "
    );
}

#[test]
fn feed_reports_each_character() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks);
    let mut out = String::new();

    assert_eq!(console.feed(b'S', &mut out), PushOutcome::Stored);
    assert_eq!(console.feed(0x08, &mut out), PushOutcome::Erased);
    assert_eq!(console.feed(0x08, &mut out), PushOutcome::Ignored);
    assert_eq!(console.feed(0x01, &mut out), PushOutcome::Dropped);
    assert_eq!(console.feed(b'\r', &mut out), PushOutcome::LineReady);
    assert!(out.is_empty());
}

#[test]
fn overlong_line_is_truncated_and_reported() {
    let ticks = TickSignal::new();
    let mut console = Console::<_, _, 8>::with_line_capacity(engine(&ticks));

    // Seven characters fit, the trailing "F" is dropped
    assert_eq!(
        send(&mut console, "LED1 OFF\r"),
        "[ERR] Etat LED invalide (ON/OFF attendu)\r\nSTM32> "
    );
    assert_eq!(console.assembler().cursor(), 0);

    let status = send(&mut console, "STATUS\r");
    assert!(status.contains("Attention: Commande tronquee detectee!\r\n"));

    let status = send(&mut console, "STATUS\r");
    assert!(!status.contains("Attention"));
}

#[test]
fn custom_prompt() {
    let ticks = TickSignal::new();
    let mut console = console(&ticks).with_prompt("> ");

    assert_eq!(send(&mut console, "STOP\r"), "[OK] Aucun chenillard actif a arreter\r\n> ");
}

// ============================================================================
// Receive Queue
// ============================================================================

fn push_all<const N: usize>(rx: &RxBuffer<N>, text: &str) {
    for byte in text.bytes() {
        rx.push(byte);
    }
}

#[test]
fn service_drains_queue_and_answers_every_line() {
    let ticks = TickSignal::new();
    let rx: RxBuffer<32> = RxBuffer::new();
    let mut console = console(&ticks);
    let mut out = String::new();

    push_all(&rx, "LED1 ON\rPAT1\r");
    assert_eq!(console.service(&rx, &mut out), 13);
    assert!(rx.is_empty());
    assert_eq!(
        out,
        "[OK] LED 1 mise a ON\r\nSTM32> [OK] Chenillard 1 active\r\nSTM32> "
    );
}

#[test]
fn partial_lines_wait_for_their_terminator() {
    let ticks = TickSignal::new();
    let rx: RxBuffer<8> = RxBuffer::new();
    let mut console = console(&ticks);
    let mut out = String::new();

    push_all(&rx, "STO");
    console.service(&rx, &mut out);
    assert!(out.is_empty());
    assert_eq!(console.assembler().contents(), "STO");

    push_all(&rx, "P\r");
    console.service(&rx, &mut out);
    assert_eq!(out, "[OK] Aucun chenillard actif a arreter\r\nSTM32> ");
}

#[test]
fn queue_overflow_is_reported_once_in_status() {
    let ticks = TickSignal::new();
    let rx: RxBuffer<4> = RxBuffer::new();
    let mut console = console(&ticks);
    let mut out = String::new();

    // The carriage return does not fit
    push_all(&rx, "PAT1\r");
    assert_eq!(console.service(&rx, &mut out), 4);
    assert!(out.is_empty());

    push_all(&rx, "\r");
    console.service(&rx, &mut out);
    assert_eq!(out, "[OK] Chenillard 1 active\r\nSTM32> ");

    out.clear();
    push_all(&rx, "STAT");
    console.service(&rx, &mut out);
    push_all(&rx, "US\r");
    console.service(&rx, &mut out);
    assert!(out.contains("Attention: Debordement buffer UART detecte!\r\n"));
    assert!(out.ends_with(OK_PROMPT));

    out.clear();
    push_all(&rx, "STAT");
    console.service(&rx, &mut out);
    push_all(&rx, "US\r");
    console.service(&rx, &mut out);
    assert!(!out.contains("Attention"));
}
