use std::io;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use sysmon::system::kill::{KillResult, LibcSignaler, SIGTERM, Signaler, terminate};

fn spawn_long_lived_child() -> Child {
    Command::new("sleep")
        .arg("30")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn child process")
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(50)),
            Ok(None) => return false,
            Err(err) => panic!("failed waiting for child exit: {err}"),
        }
    }
}

#[test]
fn sigterm_to_missing_pid_reports_esrch() {
    let result = terminate(&LibcSignaler, &(i32::MAX).to_string());
    assert_eq!(
        result,
        KillResult::Failed {
            pid: i32::MAX as u32,
            errno: libc::ESRCH,
        }
    );
}

#[test]
fn out_of_range_pid_is_rejected_before_signalling() {
    let err: io::Error = LibcSignaler.send(u32::MAX, SIGTERM).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EINVAL));
    assert_eq!(terminate(&LibcSignaler, "0"), KillResult::InvalidPid);
}

#[test]
fn sigterm_stops_spawned_child() {
    let mut child = spawn_long_lived_child();
    let pid = child.id();

    let result = terminate(&LibcSignaler, &pid.to_string());
    if result != KillResult::Sent(pid) {
        let _ = child.kill();
        panic!("unexpected kill result: {result:?}");
    }
    assert_eq!(
        result.message(),
        format!("Sent SIGTERM to {pid}. Press any key to continue...")
    );

    if !wait_for_exit(&mut child, Duration::from_secs(5)) {
        let _ = child.kill();
        panic!("child process did not exit before timeout");
    }
}
