#![allow(dead_code)]

use futures::channel::oneshot;
use input_portal_ui::{Configuration, HostError, Presentation, Reflect, SettingsHost, Timer};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Everything the fakes observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Save(Configuration),
    Disable,
    Enable,
    Reflect(Configuration, Reflect),
    Sleep(u32),
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

pub fn journal() -> Journal {
    let _ = env_logger::builder().is_test(true).try_init();
    Rc::new(RefCell::new(Vec::new()))
}

pub fn saves(journal: &Journal) -> usize {
    journal
        .borrow()
        .iter()
        .filter(|e| matches!(e, Event::Save(_)))
        .count()
}

pub enum SaveReply {
    Answer(bool),
    Fail,
    /// Wait for the test to release the reply.
    Gate(oneshot::Receiver<bool>),
}

pub struct FakeHost {
    pub journal: Journal,
    pub config: Configuration,
    pub presets: Vec<String>,
    pub port: Option<u16>,
    pub fail_load: bool,
    pub fail_port: bool,
    pub replies: RefCell<VecDeque<SaveReply>>,
}

impl FakeHost {
    pub fn new(journal: &Journal, config: Configuration) -> Self {
        Self {
            journal: journal.clone(),
            config,
            presets: vec!["default".to_string(), "neon".to_string()],
            port: Some(61477),
            fail_load: false,
            fail_port: false,
            replies: RefCell::new(VecDeque::new()),
        }
    }

    pub fn reply(self, reply: SaveReply) -> Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }
}

fn unavailable(command: &str) -> HostError {
    HostError::Call {
        command: command.to_string(),
        message: "host unavailable".to_string(),
    }
}

impl SettingsHost for FakeHost {
    async fn load_config(&self) -> Result<Configuration, HostError> {
        if self.fail_load {
            return Err(unavailable("get_config"));
        }
        Ok(self.config.clone())
    }

    async fn save_config(&self, candidate: &Configuration) -> Result<bool, HostError> {
        self.journal
            .borrow_mut()
            .push(Event::Save(candidate.clone()));
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            None => Ok(true),
            Some(SaveReply::Answer(saved)) => Ok(saved),
            Some(SaveReply::Fail) => Err(unavailable("set_config")),
            Some(SaveReply::Gate(rx)) => Ok(rx.await.unwrap_or(false)),
        }
    }

    async fn load_port(&self) -> Result<Option<u16>, HostError> {
        if self.fail_port {
            return Err(unavailable("get_port"));
        }
        Ok(self.port)
    }

    async fn load_version(&self) -> Result<String, HostError> {
        Ok("1.2.0".to_string())
    }

    async fn load_presets(&self) -> Result<Vec<String>, HostError> {
        Ok(self.presets.clone())
    }

    async fn close_window(&self) {}

    async fn open_external(&self, _site: &str) {}
}

/// Records lock changes and reflections; mirrors the shell's disabled flag.
pub struct FakePresentation {
    pub journal: Journal,
    pub disabled: Rc<Cell<bool>>,
}

impl FakePresentation {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            disabled: Rc::new(Cell::new(true)),
        }
    }
}

impl Presentation for FakePresentation {
    fn disable_all(&self) {
        self.disabled.set(true);
        self.journal.borrow_mut().push(Event::Disable);
    }

    fn enable_all(&self) {
        self.disabled.set(false);
        self.journal.borrow_mut().push(Event::Enable);
    }

    fn reflect(&self, committed: &Configuration, cause: Reflect) {
        self.journal
            .borrow_mut()
            .push(Event::Reflect(committed.clone(), cause));
    }
}

/// Timer that advances a logical clock instead of waiting.
#[derive(Clone)]
pub struct VirtualClock {
    pub journal: Journal,
    pub now: Rc<Cell<u64>>,
}

impl VirtualClock {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            now: Rc::new(Cell::new(0)),
        }
    }
}

impl Timer for VirtualClock {
    async fn sleep(&self, ms: u32) {
        self.now.set(self.now.get() + ms as u64);
        self.journal.borrow_mut().push(Event::Sleep(ms));
    }
}
