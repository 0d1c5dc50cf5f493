use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use crate::import::{ContextKind, ImportError, SharedData, SharedEntry, StringScratch};

struct CountingEntry {
	resets: Rc<Cell<usize>>,
}

impl SharedEntry for CountingEntry {
	fn kind(&self) -> ContextKind {
		ContextKind::GraphNodes
	}

	fn reset(&mut self) {
		self.resets.set(self.resets.get() + 1);
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

#[test]
fn bootstrap_provides_string_helper() {
	let mut shared = SharedData::bootstrap();
	assert!(shared.contains(ContextKind::Strings));
	let strings = shared.strings().expect("string helper bootstrapped");
	strings.strings_read = 3;
	assert_eq!(shared.strings().expect("same entry").strings_read, 3);
}

#[test]
fn reset_clears_entries_in_place() {
	let mut shared = SharedData::bootstrap();
	shared.strings().expect("strings").buffer.extend_from_slice(b"abc");
	shared.reset();
	assert!(shared.strings().expect("strings").buffer.is_empty());
}

#[test]
fn drop_resets_every_entry() {
	let resets = Rc::new(Cell::new(0));
	{
		let mut shared = SharedData::bootstrap();
		shared.insert(Box::new(CountingEntry { resets: Rc::clone(&resets) }));
	}
	assert_eq!(resets.get(), 1);
}

#[test]
fn wrong_entry_type_reports_missing_context() {
	let mut shared = SharedData::bootstrap();
	shared.insert(Box::new(CountingEntry {
		resets: Rc::new(Cell::new(0)),
	}));
	let err = shared.graph_nodes().expect_err("replaced entry is not a GraphNodeTable");
	assert!(matches!(err, ImportError::MissingContext { kind: "graph_nodes" }));
	assert!(shared.get_mut::<StringScratch>(ContextKind::Strings).is_ok());
}
