//! Stack-machine execution of lowered instructions.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::ir::Instr;
use crate::value::Value;

/// Execution state: operand stack plus name-to-value environment.
///
/// A machine is built fresh inside every `execute` call and dropped
/// when it returns, so unrelated runs never share state and can run
/// from parallel threads.
#[derive(Debug, Default)]
struct Machine {
    stack: Vec<Value>,
    env: HashMap<String, Value>,
}

impl Machine {
    fn pop(&mut self) -> Result<Value, CoreError> {
        self.stack
            .pop()
            .ok_or(CoreError::InvariantViolation("operand stack underflow"))
    }
}

/// Execute an instruction sequence, returning the values emitted by
/// `Print` in order.
///
/// `InvariantViolation` marks a pipeline bug, not a user error: code
/// lowered from an analyzed program can neither underflow the operand
/// stack nor load an unbound name. The run aborts rather than guessing
/// a value.
pub fn execute(ir: &[Instr]) -> Result<Vec<Value>, CoreError> {
    let mut machine = Machine::default();
    let mut output = Vec::new();

    for instr in ir {
        match instr {
            Instr::Push(value) => machine.stack.push(*value),
            Instr::Load(name) => {
                let value = machine
                    .env
                    .get(name)
                    .copied()
                    .ok_or(CoreError::InvariantViolation("load of unbound name"))?;
                machine.stack.push(value);
            }
            Instr::Store(name) => {
                // overwrite allowed here; uniqueness was the analyzer's job
                let value = machine.pop()?;
                machine.env.insert(name.clone(), value);
            }
            Instr::Add => {
                let b = machine.pop()?;
                let a = machine.pop()?;
                machine.stack.push(a.add(b));
            }
            Instr::Print => {
                let value = machine.pop()?;
                output.push(value);
            }
        }
    }

    Ok(output)
}
