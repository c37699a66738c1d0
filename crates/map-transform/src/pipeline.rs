use mapdoc::{MapDocument, Point3};

use crate::center::find_center;
use crate::config::RunConfig;
use crate::error::Result;
use crate::transform::{Transform, TransformQueue};

/// The transform queue built for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub queue: TransformQueue,
    /// Center the map was made relative to, if requested
    pub center: Option<Point3>,
}

/// Builds per-document queues: pre-transforms derived from the document
/// itself, then the user transforms, then post-transforms.
pub struct PipelineAssembler<'a> {
    config: &'a RunConfig,
}

impl<'a> PipelineAssembler<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    pub fn assemble(&self, doc: &MapDocument) -> Result<Pipeline> {
        let center = if self.config.make_relative {
            Some(find_center(doc)?)
        } else {
            None
        };

        let mut queue = TransformQueue::new();
        queue.extend(center.map(Transform::Recenter));
        queue.extend(self.config.transforms.iter().copied());
        // No post-transforms exist yet

        Ok(Pipeline { queue, center })
    }
}
