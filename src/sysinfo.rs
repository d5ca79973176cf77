use std::ffi::OsStr;
use std::io;

use colored::Colorize;
use nix::sys::utsname::{uname, UtsName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
}

impl SystemInfo {
    /// Asks the kernel through `uname(2)`.
    pub fn probe() -> io::Result<Self> {
        let uts = uname().map_err(io::Error::from)?;
        Ok(Self::from_uts(&uts))
    }

    pub fn from_uts(uts: &UtsName) -> Self {
        SystemInfo {
            sysname: field(uts.sysname()),
            nodename: field(uts.nodename()),
            release: field(uts.release()),
            version: field(uts.version()),
        }
    }

    pub fn render(&self, color: bool) -> String {
        let fields = [
            ("sysname", &self.sysname),
            ("nodename", &self.nodename),
            ("release", &self.release),
            ("version", &self.version),
        ];

        let mut out = String::new();
        for (label, value) in fields {
            if color {
                out.push_str(&format!("{}: {}\n", label.bold(), value));
            } else {
                out.push_str(&format!("{}: {}\n", label, value));
            }
        }
        out
    }
}

fn field(value: &OsStr) -> String {
    value.to_string_lossy().into_owned()
}
