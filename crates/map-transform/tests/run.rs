use anyhow::Result;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use map_transform::mapdoc::Point3;
use map_transform::{DocumentStatus, ErrorKind, RunConfig, Transform, run};

const LEVEL: &str = r#"<map>
  <object posX="1" posY="2" posZ="3"/>
  <trigger name="exit"/>
  <pickup posX="-1" posY="0" posZ="5"/>
</map>
"#;

#[test]
fn rewrites_in_place_when_output_is_input() -> Result<()> {
    let temp = TempDir::new()?;
    let level = temp.child("level.xml");
    level.write_str(LEVEL)?;

    let config = RunConfig {
        inputs: vec![level.to_path_buf()],
        outputs: vec![level.to_path_buf()],
        make_relative: false,
        transforms: vec![Transform::Translate(Point3::new(0.0, -2.0, 0.0))],
    };
    let report = run(&config)?;
    assert_eq!(report.exit_kind(), ErrorKind::NoError);

    level.assert(
        LEVEL
            .replace(r#"posY="2""#, r#"posY="0""#)
            .replace(r#"posY="0" posZ="5""#, r#"posY="-2" posZ="5""#),
    );
    Ok(())
}

#[test]
fn report_records_each_document() -> Result<()> {
    let temp = TempDir::new()?;
    temp.child("good.xml").write_str(LEVEL)?;
    temp.child("bad.xml")
        .write_str(r#"<map><checkpoint posX="1" posY="x" posZ="0"/></map>"#)?;

    let config = RunConfig {
        inputs: vec![
            temp.child("bad.xml").to_path_buf(),
            temp.child("good.xml").to_path_buf(),
        ],
        outputs: vec![
            temp.child("bad.out.xml").to_path_buf(),
            temp.child("good.out.xml").to_path_buf(),
        ],
        make_relative: true,
        transforms: vec![],
    };
    let report = run(&config)?;

    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.exit_kind(), ErrorKind::MapItemReadError);

    match &report.documents[1].status {
        DocumentStatus::Transformed { items, center } => {
            assert_eq!(*items, 2);
            assert_eq!(*center, Some([0.0, 1.0, 4.0]));
        }
        status => panic!("unexpected status: {status:?}"),
    }

    assert!(!temp.child("bad.out.xml").path().exists());
    temp.child("good.out.xml").assert(
        LEVEL
            .replace(
                r#"posX="1" posY="2" posZ="3""#,
                r#"posX="1" posY="1" posZ="-1""#,
            )
            .replace(
                r#"posX="-1" posY="0" posZ="5""#,
                r#"posX="-1" posY="-1" posZ="1""#,
            ),
    );
    Ok(())
}

#[test]
fn configuration_errors_touch_nothing() -> Result<()> {
    let temp = TempDir::new()?;
    temp.child("a.xml").write_str(LEVEL)?;

    let config = RunConfig {
        inputs: vec![temp.child("a.xml").to_path_buf()],
        outputs: vec![temp.child("a.out.xml").to_path_buf()],
        make_relative: false,
        transforms: vec![],
    };
    let err = run(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoTransforms);
    assert!(!temp.child("a.out.xml").path().exists());
    Ok(())
}
