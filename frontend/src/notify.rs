use std::rc::Rc;

use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Toast queue. Oldest notices fall off once `limit` is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
    limit: usize,
}

impl Notices {
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            limit: limit.max(1),
        }
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > self.limit {
            let drain = self.items.len() - self.limit;
            self.items.drain(0..drain);
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }
}

pub enum NoticeAction {
    Push(NoticeKind, String),
    Dismiss(u64),
}

impl Reducible for Notices {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NoticeAction::Push(kind, message) => next.push(kind, message),
            NoticeAction::Dismiss(id) => next.dismiss(id),
        }
        Rc::new(next)
    }
}
