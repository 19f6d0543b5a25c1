/// Render one bookmark as a standalone text block
pub trait BookmarkFormat {
    fn to_string(&self) -> String;
}
