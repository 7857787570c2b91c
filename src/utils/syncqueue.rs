use std::{cell::RefCell, collections::VecDeque};

pub struct SyncQueue<T> {
    el: RefCell<VecDeque<T>>,
}

impl<T> Default for SyncQueue<T> {
    fn default() -> Self {
        Self {
            el: Default::default(),
        }
    }
}

impl<T> SyncQueue<T> {
    pub fn push(&self, t: T) {
        self.el.borrow_mut().push_back(t);
    }

    pub fn pop(&self) -> Option<T> {
        self.el.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.el.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.el.borrow().is_empty()
    }

    pub fn take(&self) -> VecDeque<T> {
        std::mem::take(&mut *self.el.borrow_mut())
    }
}
