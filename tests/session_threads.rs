//! Threaded exercise of a shared prompt session.
//!
//! Simulates the host-process pattern: many threads hitting the render API
//! through one lock while the output sink is shared. No FFI, no real
//! terminal - pure Rust against an in-memory sink.
//!
//! Run with: cargo test --test session_threads

use std::sync::{Arc, Mutex};
use std::thread;

use promptline::session::{ENV_DISABLE_ANSI, ENV_FORCE_ANSI, Session};

fn capable_session() -> Session {
    // SAFETY: the only other test in this binary never reads the
    // environment, and the session is configured before threads spawn.
    unsafe {
        std::env::remove_var(ENV_DISABLE_ANSI);
        std::env::set_var(ENV_FORCE_ANSI, "1");
    }
    let mut session = Session::new();
    session.configure().expect("configure should succeed");
    assert!(session.ansi_supported());
    session
}

#[test]
fn forced_capability_end_to_end() {
    let mut session = capable_session();

    let mut out = Vec::new();
    session.render_prompt(&mut out, Some(24), "> ", "Balance: 100");
    assert!(String::from_utf8_lossy(&out).contains("\x1b[21;1H"));

    out.clear();
    session.update_status(&mut out, Some(24), "Balance: 90");
    assert_eq!(out, b"\x1b7\x1b[22;1H\x1b[2KBalance: 90\x1b8");

    out.clear();
    session.suspend(&mut out, Some(24));
    assert!(session.suspended());

    // Frozen until the next render.
    out.clear();
    session.update_status(&mut out, Some(24), "Balance: 80");
    assert!(out.is_empty());

    session.resume();
    out.clear();
    session.render_prompt(&mut out, Some(24), "> ", "Balance: 80");
    assert!(session.status_line_active());

    session.restore();
    session.restore(); // second restore is a no-op
}

#[test]
fn concurrent_callers_never_corrupt_state() {
    const THREADS: usize = 8;
    const ITERATIONS: usize = 200;

    // Session and sink share one lock, as in the FFI layer.
    let shared = Arc::new(Mutex::new((Session::new(), Vec::<u8>::new())));

    // Half the threads see geometry, half do not, and one thread flips
    // between both, so positioned, degraded, and sequential paths all run.
    let handles: Vec<_> = (0..THREADS)
        .map(|tid| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..ITERATIONS {
                    let rows = match tid % 3 {
                        0 => Some(24),
                        1 => None,
                        _ => if i % 2 == 0 { Some(24) } else { Some(3) },
                    };

                    let mut guard = shared.lock().unwrap();
                    let (session, sink) = &mut *guard;
                    match (tid + i) % 5 {
                        0 => session.render_prompt(sink, rows, "> ", "Balance: 100"),
                        1 => session.update_status(sink, rows, "Balance: 90"),
                        2 => session.suspend(sink, rows),
                        3 => session.resume(),
                        _ => session.render_prompt(sink, rows, "$ ", "ready"),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let guard = shared.lock().unwrap();
    let (session, sink) = &*guard;

    // The state invariants must survive any interleaving.
    assert!(
        !session.status_line_active() || session.prompt_rendered(),
        "status line active without a rendered prompt"
    );
    assert!(
        !session.suspended() || !session.status_line_active(),
        "suspension left the status line active"
    );

    // Capability was never granted, so no escape byte may have been emitted.
    assert!(!session.ansi_supported());
    assert!(!sink.contains(&0x1b), "fallback output contained escapes");
}
