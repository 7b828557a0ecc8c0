use authbook_types::{
    AccountUpdate, Credential, Document, Node, OrderedEntry, OrderedMap, SlotEntry, StepHeader,
    StepRecord,
};
use tracing::info;

use crate::error::StoreResult;
use crate::step::StepRecorder;
use crate::writer;

/// Whole-document credential store.
///
/// All implementations must satisfy these invariants:
/// - `load` of a store that was never saved returns an empty document.
/// - `save` replaces the whole document; a failed save leaves the previous
///   document readable and propagates the error.
/// - Every mutating operation reloads the document immediately before
///   applying its change, so it always merges into the latest saved state.
pub trait DocumentStore: Send + Sync {
    /// Read the whole document.
    fn load(&self) -> StoreResult<Document>;

    /// Replace the whole document.
    fn save(&self, document: &Document) -> StoreResult<()>;

    /// Load, apply `mutate`, and save.
    ///
    /// The default runs the three steps back to back. Backends shared between
    /// writers override this to hold exclusive access for the whole cycle.
    fn update(&self, mutate: &mut dyn FnMut(&mut Document)) -> StoreResult<()> {
        let mut document = self.load()?;
        mutate(&mut document);
        self.save(&document)
    }

    /// Write the supplied views into the node for `(project, file)`,
    /// creating it if needed.
    ///
    /// `accounts` merges into `by_address`; `accounts_list`, `accounts_slots`
    /// and `product_address_slots` replace their views when supplied.
    fn write(&self, project: &str, file: &str, update: &AccountUpdate) -> StoreResult<()> {
        self.update(&mut |document| writer::apply(document.node_mut(project, file), update))?;
        info!(
            project,
            file,
            accounts = update.accounts.as_ref().map_or(0, |a| a.len()),
            ordered = update.accounts_list.as_ref().map_or(0, |l| l.len()),
            "accounts written"
        );
        Ok(())
    }

    /// Append a step record to the node for `(project, file)`.
    ///
    /// Existing records are never inspected or modified.
    fn write_step(
        &self,
        project: &str,
        file: &str,
        header: &StepHeader,
        update: &AccountUpdate,
    ) -> StoreResult<()> {
        self.update(&mut |document| {
            StepRecorder::append(document.node_mut(project, file), header, update);
        })?;
        info!(
            project,
            file,
            step_index = header.index,
            step_name = %header.resolved_name(),
            operation_event = %header.event,
            "step accounts recorded"
        );
        Ok(())
    }

    /// The node for `(project, file)`, or an empty node if there is none.
    fn read_node(&self, project: &str, file: &str) -> StoreResult<Node> {
        let document = self.load()?;
        Ok(document.node(project, file).cloned().unwrap_or_default())
    }

    /// The `by_address` view of one node.
    fn read(&self, project: &str, file: &str) -> StoreResult<OrderedMap<Credential>> {
        Ok(self.read_node(project, file)?.by_address)
    }

    /// The `by_order` view of one node.
    fn read_list(&self, project: &str, file: &str) -> StoreResult<Vec<OrderedEntry>> {
        Ok(self.read_node(project, file)?.by_order)
    }

    /// The `by_slot` view of one node.
    fn read_slots(&self, project: &str, file: &str) -> StoreResult<OrderedMap<SlotEntry>> {
        Ok(self.read_node(project, file)?.by_slot)
    }

    /// The `product_address_slots` view of one node.
    fn read_address_slots(&self, project: &str, file: &str) -> StoreResult<OrderedMap<String>> {
        Ok(self.read_node(project, file)?.product_address_slots)
    }

    /// The step history of one node, oldest first.
    fn read_steps(&self, project: &str, file: &str) -> StoreResult<Vec<StepRecord>> {
        Ok(self.read_node(project, file)?.by_step)
    }

    /// Project names in document order.
    fn projects(&self) -> StoreResult<Vec<String>> {
        let document = self.load()?;
        Ok(document.projects().map(str::to_string).collect())
    }

    /// File names of one project in document order.
    fn files(&self, project: &str) -> StoreResult<Vec<String>> {
        let document = self.load()?;
        Ok(document.files(project).into_iter().map(str::to_string).collect())
    }
}
