use std::error::Error;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Instant;
use assert_fs::TempDir;
use crate::constants::{KILL_CHECK_INTERVAL, TERM_WAIT};
use crate::{new_configured_command, BackgroundReader, ChildKillTermExt, DAEMON_BIN_PATH};

pub const ROCKET_STARTED_STRING: &str = "Rocket has launched from";

const STARTUP_TIMEOUT_MS: u64 = 30000;

/// A daemon process listening on the port its config dir names.
///
/// Dropping it without [`RunningDaemon::stop`] sends SIGTERM, and
/// SIGKILL if the daemon is still around after [`TERM_WAIT`].
pub struct RunningDaemon {
    child: Option<Child>,
    log: Option<BackgroundReader>,
}

impl RunningDaemon {
    /// Starts the daemon configured by `dir` and waits until it listens
    pub fn spawn(dir: &TempDir) -> Result<RunningDaemon, Box<dyn Error>> {
        let mut child = new_daemon_command(dir).spawn()?;
        let log = match child.stderr.take() {
            Some(stderr) => BackgroundReader::new(stderr, Some(STARTUP_TIMEOUT_MS)),
            None => {
                let _ = child.kill();
                return Err("daemon stderr is not piped".into())
            },
        };
        let mut daemon = RunningDaemon {
            child: Some(child),
            log: Some(log?),
        };
        daemon.log()?.wait_until(ROCKET_STARTED_STRING)?;
        Ok(daemon)
    }

    /// Log output collected since the last call
    pub fn take_log(&mut self) -> Result<String, Box<dyn Error>> {
        Ok(self.log()?.take())
    }

    /// SIGTERMs the daemon, returns its exit status and remaining log
    pub fn stop(mut self) -> Result<(ExitStatus, String), Box<dyn Error>> {
        let mut child = self.child.take().ok_or("daemon already stopped")?;
        let log = self.log.take().ok_or("daemon log already taken")?;
        child.kill_term()?;
        let remaining = log.read_to_end()?;
        Ok((child.wait()?, remaining))
    }

    pub fn stop_assert_no_errors(self) -> Result<(), Box<dyn Error>> {
        let (status, log) = self.stop()?;
        assert!(!log.contains("ERROR"), "errors in the log: {log}");
        assert!(status.success(), "daemon exited with {status}");
        Ok(())
    }

    fn log(&mut self) -> Result<&mut BackgroundReader, Box<dyn Error>> {
        self.log.as_mut().ok_or_else(|| "daemon log already taken".into())
    }
}

impl Drop for RunningDaemon {
    fn drop(&mut self) {
        let Some(ref mut child) = self.child else {
            return
        };
        match child.try_wait() {
            Ok(Some(_)) => return,
            Err(e) => {
                eprintln!("failed checking daemon status: {e}");
                return
            },
            Ok(None) => (),
        }

        let id = child.id();
        if let Err(e) = child.kill_term() {
            eprintln!("leaking daemon {id}, SIGTERM failed: {e}");
            return
        }
        let wait_start = Instant::now();
        while wait_start.elapsed() < TERM_WAIT {
            match child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => thread::sleep(KILL_CHECK_INTERVAL),
                Err(e) => {
                    eprintln!("failed waiting for daemon {id}: {e}");
                    return
                },
            }
        }
        eprintln!(
            "daemon {id} ignored SIGTERM for {} ms, killing",
            TERM_WAIT.as_millis(),
        );
        if let Err(e) = child.kill().and_then(|_| child.wait()) {
            eprintln!("leaking daemon {id}, SIGKILL failed: {e}");
        }
    }
}

pub fn new_daemon_command(dir: &TempDir) -> Command {
    let mut command = new_configured_command(&DAEMON_BIN_PATH, dir);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    command
}
