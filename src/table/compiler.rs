//! Single-pass compilation of definition records into an [`OpcodeTable`].

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use super::ident::{canonical_identifier, is_emittable, metadata_identifier, RESERVED_IDENTIFIERS};
use super::{OpMeta, OpcodeTable, TableEntry};
use crate::core::{GenError, GenResult};
use crate::definition::InstructionRecord;

/// Owner of a generated constant name, kept for collision diagnostics.
enum NameOwner {
    Preamble,
    Record(usize),
}

/// Build the opcode table, rejecting identifier collisions and duplicate codes.
pub fn compile(records: Vec<InstructionRecord>) -> GenResult<OpcodeTable> {
    let mut table = OpcodeTable::empty();
    let mut names: HashMap<String, NameOwner> = RESERVED_IDENTIFIERS
        .iter()
        .map(|name| (name.to_string(), NameOwner::Preamble))
        .collect();

    for record in records {
        let ident = canonical_identifier(&record.text);
        if !is_emittable(&ident) {
            return Err(GenError::malformed(
                record.line,
                format!("mnemonic {:?} does not form a valid identifier", record.text),
            ));
        }

        let index = table.entries.len();
        for name in [ident.clone(), metadata_identifier(&ident)] {
            match names.entry(name) {
                Entry::Occupied(slot) => {
                    let first = match slot.get() {
                        NameOwner::Preamble => "<preamble>".to_string(),
                        NameOwner::Record(idx) => table.entries[*idx].record.text.clone(),
                    };
                    return Err(GenError::NameCollision {
                        ident: slot.key().clone(),
                        first,
                        second: record.text,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(NameOwner::Record(index));
                }
            }
        }

        let slot = &mut table.slots[usize::from(record.code)];
        if let Some(existing) = *slot {
            return Err(GenError::DuplicateOpcode {
                code: record.code,
                first: table.entries[existing].record.text.clone(),
                second: record.text,
            });
        }
        *slot = Some(index);

        log::trace!("{:#04x} => {}", record.code, ident);
        table.entries.push(TableEntry {
            meta: OpMeta::from_record(&record),
            ident,
            record,
        });
    }

    log::debug!("compiled opcode table with {} entries", table.len());
    Ok(table)
}
