use super::RowCursor;

use weft_core::{
    schema::{Descent, Traversal, Visit},
    Result,
};

/// Step the cursor over the columns of `descent` and everything the
/// traversal would have joined below it, without building nodes.
pub(crate) fn skip_subtree(
    traversal: &Traversal<'_>,
    descent: &Descent,
    cursor: &mut RowCursor<'_>,
) -> Result<()> {
    let model = traversal.schema.model(descent.model);
    cursor.advance(model.columns.len())?;
    skip_links(traversal, descent, cursor)
}

/// Step over the columns joined below `descent`, leaving its own columns.
pub(crate) fn skip_links(
    traversal: &Traversal<'_>,
    descent: &Descent,
    cursor: &mut RowCursor<'_>,
) -> Result<()> {
    let model = traversal.schema.model(descent.model);

    for link in model.links.values() {
        match traversal.visit(descent, link) {
            Visit::Skip => {}
            Visit::Route(child) => skip_links(traversal, &child, cursor)?,
            Visit::Enter(child) => skip_subtree(traversal, &child, cursor)?,
        }
    }

    Ok(())
}
