//! In-memory document: glyph objects, their placements, and groups
//!
//! Objects carry their synthesized outline and a placement. The bounding box
//! is derived state: any change marks the object as touched, and only
//! [`Document::recompute`] refreshes it. Reading a touched object's box is
//! an error rather than a silently stale answer.

use std::fmt;
use std::sync::Arc;

use kurbo::Shape;

use crate::{
    error::{DocumentError, Result},
    traits::{FontRef, GlyphHost, GlyphSynthesizer},
    types::{BoundBox, GlyphParams, GlyphShape, Placement},
};

/// Handle to a glyph object inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a group inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(u32);

/// One synthesized glyph living in the document
#[derive(Debug, Clone)]
pub struct GlyphObject {
    id: ObjectId,
    name: String,
    label: String,
    shape: GlyphShape,
    placement: Placement,
    bound_box: Option<BoundBox>,
}

impl GlyphObject {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Internal name, unique and assigned at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> &GlyphShape {
        &self.shape
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Last recomputed bounding box, `None` while the object is touched
    pub fn bound_box(&self) -> Option<BoundBox> {
        self.bound_box
    }

    /// Outline transformed by the current placement
    pub fn placed_outline(&self) -> kurbo::BezPath {
        self.placement.affine() * self.shape.outline.clone()
    }

    fn compute_bound_box(&self) -> BoundBox {
        let z = self.placement.base.z;
        if self.shape.is_empty() {
            return BoundBox::point(self.placement.base);
        }
        BoundBox::from_rect(self.placed_outline().bounding_box(), z)
    }
}

/// Named, ordered collection of objects
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    name: String,
    members: Vec<ObjectId>,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[ObjectId] {
        &self.members
    }
}

/// The scene graph every face is built in
pub struct Document {
    synthesizer: Arc<dyn GlyphSynthesizer>,
    objects: Vec<GlyphObject>,
    groups: Vec<Group>,
    recomputes: usize,
}

impl Document {
    /// Start an empty document that synthesizes glyphs with `synthesizer`
    pub fn new(synthesizer: Arc<dyn GlyphSynthesizer>) -> Self {
        Self {
            synthesizer,
            objects: Vec::new(),
            groups: Vec::new(),
            recomputes: 0,
        }
    }

    pub fn objects(&self) -> &[GlyphObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Result<&GlyphObject> {
        self.objects
            .get(id.0 as usize)
            .ok_or_else(|| DocumentError::UnknownObject(id.0).into())
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut GlyphObject> {
        self.objects
            .get_mut(id.0 as usize)
            .ok_or_else(|| DocumentError::UnknownObject(id.0).into())
    }

    pub fn group(&self, id: GroupId) -> Result<&Group> {
        self.groups
            .get(id.0 as usize)
            .ok_or_else(|| DocumentError::UnknownGroup(id.0).into())
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// How many times the document has been recomputed
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    /// Whether any object is waiting for a recompute
    pub fn is_touched(&self) -> bool {
        self.objects.iter().any(|object| object.bound_box.is_none())
    }

    fn next_object_name(&self) -> String {
        match self.objects.len() {
            0 => "ShapeString".to_string(),
            n => format!("ShapeString{:03}", n),
        }
    }

    fn unique_group_name(&self, name: &str) -> String {
        if self.group_by_name(name).is_none() {
            return name.to_string();
        }
        (1..)
            .map(|n| format!("{}{:03}", name, n))
            .find(|candidate| self.group_by_name(candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }
}

impl GlyphHost for Document {
    fn synthesize_glyph(
        &mut self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &GlyphParams,
    ) -> Result<ObjectId> {
        let shape = self.synthesizer.synthesize(text, font, params)?;
        let id = ObjectId(self.objects.len() as u32);
        let name = self.next_object_name();

        log::debug!(
            "{}: synthesized {:?} as {} ({})",
            self.synthesizer.name(),
            text,
            name,
            id
        );

        self.objects.push(GlyphObject {
            id,
            label: name.clone(),
            name,
            shape,
            placement: Placement::IDENTITY,
            bound_box: None,
        });

        Ok(id)
    }

    fn placement(&self, id: ObjectId) -> Result<Placement> {
        Ok(self.object(id)?.placement)
    }

    fn set_placement(&mut self, id: ObjectId, placement: Placement) -> Result<()> {
        let object = self.object_mut(id)?;
        object.placement = placement;
        object.bound_box = None;
        Ok(())
    }

    fn bounding_box(&self, id: ObjectId) -> Result<BoundBox> {
        let object = self.object(id)?;
        object
            .bound_box
            .ok_or_else(|| DocumentError::StaleGeometry(object.name.clone()).into())
    }

    fn set_label(&mut self, id: ObjectId, label: &str) -> Result<()> {
        self.object_mut(id)?.label = label.to_string();
        Ok(())
    }

    fn recompute(&mut self) -> Result<()> {
        let mut refreshed = 0;
        for object in self.objects.iter_mut().filter(|o| o.bound_box.is_none()) {
            object.bound_box = Some(object.compute_bound_box());
            refreshed += 1;
        }
        self.recomputes += 1;
        log::trace!("recompute #{}: {} objects refreshed", self.recomputes, refreshed);
        Ok(())
    }

    fn add_group(&mut self, name: &str) -> Result<GroupId> {
        let id = GroupId(self.groups.len() as u32);
        let name = self.unique_group_name(name);
        self.groups.push(Group {
            id,
            name,
            members: Vec::new(),
        });
        Ok(id)
    }

    fn add_to_group(&mut self, group: GroupId, id: ObjectId) -> Result<()> {
        self.object(id)?;
        let group = self
            .groups
            .get_mut(group.0 as usize)
            .ok_or(DocumentError::UnknownGroup(group.0))?;
        if !group.members.contains(&id) {
            group.members.push(id);
        }
        Ok(())
    }

    fn group_members(&self, group: GroupId) -> Result<Vec<ObjectId>> {
        Ok(self.group(group)?.members.clone())
    }

    fn group_name(&self, group: GroupId) -> Result<String> {
        Ok(self.group(group)?.name.clone())
    }
}
