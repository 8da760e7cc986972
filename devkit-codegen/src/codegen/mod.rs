//! Code generation module

mod emitter;
mod go;
mod java;
mod naming;
mod python;
pub mod reverse;
mod type_map;
mod typescript;

pub use emitter::*;
pub use go::GoEmitter;
pub use java::JavaEmitter;
pub use naming::*;
pub use python::PythonEmitter;
pub use type_map::*;
pub use typescript::TypeScriptEmitter;
