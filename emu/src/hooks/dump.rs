use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use s8arch::reg::Reg;

use super::Hook;
use crate::error::ConfigError;
use crate::model::State;

/// Prints registers (and optionally the call stack and memory cells) when
/// execution reaches configured addresses, or on every cycle with `all`.
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

// pc -> what to print there
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct List(HashMap<u16, Config>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stack: bool,
    #[serde(default)]
    pub memory: Vec<u16>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, ConfigError> {
        let list = match &file {
            Some(fname) => {
                let f = File::open(fname).map_err(|err| ConfigError::Open(fname.clone(), err))?;
                serde_yaml::from_reader(BufReader::new(f))
                    .map_err(|err| ConfigError::Parse(fname.clone(), err))?
            }
            None => List::default(),
        };
        Ok(Self { file, all, list })
    }

    pub fn from_yaml(yaml: &str, all: bool) -> Result<Self, ConfigError> {
        let list = serde_yaml::from_str(yaml).map_err(|err| ConfigError::Parse("<str>".to_string(), err))?;
        Ok(Self {
            file: None,
            all,
            list,
        })
    }

    pub fn get(&self, pc: u16) -> Option<&Config> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, _state: &State) {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
    }

    fn exec(&mut self, _time: u64, addr: u16, _code: u16, state: &State) {
        if let Some(cfg) = self.get(addr) {
            print!("{}", format_regs(state));
            if cfg.stack {
                print!("{}", format_stack(state));
            }
            print!("{}", format_memory(state, &cfg.memory));
        } else if self.all {
            print!("{}", format_regs(state));
        }
    }
}

const RULE: &str = " +---------+---------+---------+---------+-------+";

pub fn format_regs(state: &State) -> String {
    let mut out = format!("{}\n", RULE);
    for row in 0..4u8 {
        let cells: Vec<String> = (0..4u8)
            .map(|col| {
                let reg = Reg::from_nibble(col * 4 + row);
                format!("{:>4}: {:0>2X}", reg.to_string(), state.get(reg))
            })
            .collect();
        let extra = match row {
            0 => format!("f: {} ", state.flag as u8),
            1 => format!("i: {:<2}", state.input_ptr.min(99)),
            _ => "     ".to_string(),
        };
        out += &format!(" |{} | {} |\n", cells.join(" |"), extra);
    }
    out += &format!("{}\n", RULE);
    out
}

pub fn format_stack(state: &State) -> String {
    let mut out = String::new();
    for (depth, ret) in state.backtrace.iter().enumerate().rev() {
        out += &format!(" | #{:<4} ret 0x{:0>3X}{:>30} |\n", depth, ret, "");
    }
    out += &format!("{}\n", RULE);
    out
}

pub fn format_memory(state: &State, addrs: &[u16]) -> String {
    let mut out = String::new();
    for addr in addrs {
        let val = state.memory.get(*addr as usize).copied().unwrap_or(0);
        out += &format!(" | 0x{:0>3X} : {:0>2X}{:>33} |\n", addr, val, "");
    }
    if !addrs.is_empty() {
        out += &format!("{}\n", RULE);
    }
    out
}
