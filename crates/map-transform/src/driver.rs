use log::debug;
use mapdoc::{MapDocument, read_position, write_position};

use crate::error::Result;
use crate::transform::TransformQueue;

/// Apply `queue` to every positionable direct child of the `<map>` root.
///
/// Stops at the first item that cannot be read or written. Items before it
/// stay rewritten in memory, so callers must not save a document after an
/// error. Returns the number of items rewritten.
pub fn transform_map(doc: &mut MapDocument, queue: &TransformQueue) -> Result<usize> {
    let map = doc.map_node_mut()?;
    let mut count = 0;

    for item in map
        .children_mut()
        .iter_mut()
        .filter(|c| c.is_positionable())
    {
        let before = read_position(item)?;
        let after = queue.apply(before);
        debug!(
            "<{}> at byte {}: {before} -> {after}",
            item.tag(),
            item.span().start
        );
        write_position(item, after)?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transform::Transform;
    use mapdoc::Point3;

    const TWO_ITEMS: &str =
        r#"<map><object posX="1" posY="2" posZ="3"/><pickup posX="-1" posY="0" posZ="5"/></map>"#;

    fn translate(x: f64, y: f64, z: f64) -> TransformQueue {
        [Transform::Translate(Point3::new(x, y, z))]
            .into_iter()
            .collect()
    }

    #[test]
    fn translate_rewrites_positions() {
        let mut doc = MapDocument::parse(TWO_ITEMS).unwrap();
        let count = transform_map(&mut doc, &translate(10.0, 0.0, 0.0)).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            doc.to_xml_string().unwrap(),
            r#"<map><object posX="11" posY="2" posZ="3"/><pickup posX="9" posY="0" posZ="5"/></map>"#
        );
    }

    #[test]
    fn empty_queue_keeps_values() {
        let mut doc = MapDocument::parse(TWO_ITEMS).unwrap();
        transform_map(&mut doc, &TransformQueue::new()).unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), TWO_ITEMS);
    }

    #[test]
    fn other_items_are_untouched() {
        let xml = r#"<map>
  <trigger name="gate" radius="2"/>
  <object posX="0" posY="0" posZ="0" />
  <decal posX="7" posY="7" posZ="7"/>
</map>"#;
        let mut doc = MapDocument::parse(xml).unwrap();
        assert_eq!(transform_map(&mut doc, &translate(1.0, 1.0, 1.0)).unwrap(), 1);
        let out = doc.to_xml_string().unwrap();
        assert!(out.contains(r#"<trigger name="gate" radius="2"/>"#));
        assert!(out.contains(r#"<object posX="1" posY="1" posZ="1" />"#));
        assert!(out.contains(r#"<decal posX="7" posY="7" posZ="7"/>"#));
    }

    #[test]
    fn missing_position_fails_fast() {
        let xml = r#"<map><object posX="1" posY="2" posZ="3"/><pickup posX="1" posY="2"/><object posX="4" posY="4" posZ="4"/></map>"#;
        let mut doc = MapDocument::parse(xml).unwrap();
        let err = transform_map(&mut doc, &translate(1.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPositionAttribute);

        // Earlier items keep their new values, later ones are never visited
        let map = doc.map_node().unwrap();
        assert_eq!(map.children()[0].attribute("posX"), Some("2"));
        assert_eq!(map.children()[2].attribute("posX"), Some("4"));
    }

    #[test]
    fn missing_map_node() {
        let mut doc = MapDocument::parse(r#"<scene/>"#).unwrap();
        let err = transform_map(&mut doc, &TransformQueue::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingMapNode);
    }
}
