use std::io;
use std::os::fd::AsRawFd;
use std::process::Child;

pub trait ChildKillTermExt {
    fn kill_term(&mut self) -> io::Result<()>;
}

impl ChildKillTermExt for Child {
    fn kill_term(&mut self) -> io::Result<()> {
        let pid = libc::pid_t::try_from(self.id())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        if unsafe { libc::kill(pid, libc::SIGTERM) } == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

pub trait FdNonblockExt {
    fn set_nonblock(&self, nonblock: bool) -> io::Result<()>;
}

impl<T: AsRawFd> FdNonblockExt for T {
    fn set_nonblock(&self, nonblock: bool) -> io::Result<()> {
        let fd = self.as_raw_fd();
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(io::Error::last_os_error())
        }
        let flags = if nonblock {
            flags | libc::O_NONBLOCK
        } else {
            flags & !libc::O_NONBLOCK
        };
        if unsafe { libc::fcntl(fd, libc::F_SETFL, flags) } < 0 {
            return Err(io::Error::last_os_error())
        }
        Ok(())
    }
}
