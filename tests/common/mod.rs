// Shared helpers for driving an Interpreter and reading what it printed

#![allow(dead_code)]

use clacker::Interpreter;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// In-memory sink that stays readable after being boxed into the interpreter.
#[derive(Clone, Default)]
pub struct Buffer(Rc<RefCell<Vec<u8>>>);

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capturing() -> (Interpreter, Buffer, Buffer) {
    let out = Buffer::default();
    let err = Buffer::default();
    let interpreter = Interpreter::with_output(Box::new(out.clone()), Box::new(err.clone()));
    (interpreter, out, err)
}

/// Stack contents rendered bottom first, the way `.` prints them.
pub fn rendered(interpreter: &Interpreter) -> String {
    interpreter.stack.to_string()
}
