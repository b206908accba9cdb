//! COLLADA document parser.
//!
//! A single depth-first pass over the token stream. Each element reader
//! consumes exactly its own subtree; unknown elements are skipped whole.
//! Cross-references (accessor sources, geometry and node instances) are
//! stored as IDs. Only the `<scene>` selection is resolved while reading.

use std::collections::HashMap;

use crate::data::{Accessor, AccessorParam, Data, DataLibrary};
use crate::nodes::{Node, NodeArena, NodeId};
use crate::transform::{Transform, TransformKind};

use super::error::{ErrorKind, ParseResult};
use super::options::ParserOptions;
use super::reader::strip_fragment;
use super::source::{TokenKind, TokenSource, XmlTokenSource};
use super::types::{AssetInfo, ColladaDocument, Geometry, ParserState, UpAxis};

/// Name of the document element.
const ROOT_ELEMENT: &str = "COLLADA";

/// Reads one COLLADA document from a token source.
pub struct ColladaParser<S> {
    pub(super) source: S,
    pub(super) options: ParserOptions,
    pub(super) state: ParserState,
    /// The current token has been seen but not consumed.
    pub(super) held: bool,
    depth: usize,
    pub(super) nodes: NodeArena,
    pub(super) data: DataLibrary,
    pub(super) accessors: HashMap<String, Accessor>,
    pub(super) geometries: HashMap<String, Geometry>,
    pub(super) visual_scenes: Vec<NodeId>,
    pub(super) asset: AssetInfo,
    pub(super) root: Option<NodeId>,
}

impl<'a> ColladaParser<XmlTokenSource<'a>> {
    /// Create a parser over an XML string.
    pub fn from_xml(xml: &'a str, options: ParserOptions) -> Self {
        Self::new(XmlTokenSource::new(xml), options)
    }
}

impl<S: TokenSource> ColladaParser<S> {
    /// Create a parser over any token source.
    pub fn new(source: S, options: ParserOptions) -> Self {
        Self {
            source,
            options,
            state: ParserState::Start,
            held: false,
            depth: 0,
            nodes: NodeArena::new(),
            data: DataLibrary::new(),
            accessors: HashMap::new(),
            geometries: HashMap::new(),
            visual_scenes: Vec::new(),
            asset: AssetInfo::default(),
            root: None,
        }
    }

    /// Current position in the document structure.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Parse the whole document.
    ///
    /// Either the complete document is returned or the first error; partial
    /// results are dropped.
    pub fn parse(mut self) -> ParseResult<ColladaDocument> {
        self.read_contents()?;

        if self.root.is_none() {
            if let Some(&first) = self.visual_scenes.first() {
                log::debug!(
                    "No <scene> selection in {}, using first visual scene '{}'",
                    self.options.file_name,
                    self.nodes[first].name
                );
                self.root = Some(first);
            }
        }

        log::info!(
            "Parsed {}: {} nodes ({} with IDs), {} data arrays, {} accessors, {} geometries",
            self.options.file_name,
            self.nodes.len(),
            self.nodes.library_len(),
            self.data.len(),
            self.accessors.len(),
            self.geometries.len()
        );

        Ok(ColladaDocument {
            nodes: self.nodes,
            data: self.data,
            accessors: self.accessors,
            geometries: self.geometries,
            visual_scenes: self.visual_scenes,
            asset: self.asset,
            root: self.root,
        })
    }

    /// Find the document element and read it.
    pub(super) fn read_contents(&mut self) -> ParseResult<()> {
        loop {
            match self.advance()? {
                TokenKind::ElementStart => {
                    let name = self.source.element_name();
                    if name != ROOT_ELEMENT {
                        return Err(self.error(ErrorKind::MalformedDocument(format!(
                            "expected <{ROOT_ELEMENT}> document element, found <{name}>"
                        ))));
                    }
                    return self.read_structure();
                }
                TokenKind::EndOfDocument => {
                    return Err(self.error(ErrorKind::MalformedDocument(
                        "document has no root element".to_string(),
                    )))
                }
                _ => {}
            }
        }
    }

    /// Dispatch the top-level sections of the document element.
    pub(super) fn read_structure(&mut self) -> ParseResult<()> {
        self.state = ParserState::InStructure;
        self.read_children(ROOT_ELEMENT, |parser, name| match name {
            "asset" => parser.read_section(ParserState::InAsset, Self::read_asset_info),
            "library_geometries" => {
                parser.read_section(ParserState::InGeometryLibrary, Self::read_geometry_library)
            }
            "library_visual_scenes" => {
                parser.read_section(ParserState::InSceneLibrary, Self::read_scene_library)
            }
            "library_nodes" => {
                parser.read_section(ParserState::InSceneLibrary, Self::read_node_library)
            }
            "scene" => parser.read_section(ParserState::InStructure, Self::read_scene),
            _ => parser.skip_element(),
        })?;
        self.state = ParserState::Done;
        Ok(())
    }

    fn read_section(
        &mut self,
        state: ParserState,
        read: fn(&mut Self) -> ParseResult<()>,
    ) -> ParseResult<()> {
        self.state = state;
        read(self)?;
        self.state = if self.root.is_some() {
            ParserState::SceneSelected
        } else {
            ParserState::InStructure
        };
        Ok(())
    }

    /// Read `<asset>`. The result replaces any earlier asset block.
    pub(super) fn read_asset_info(&mut self) -> ParseResult<()> {
        let mut asset = AssetInfo::default();

        self.read_children("asset", |parser, name| match name {
            "unit" => {
                if let Some(meter) = parser.optional_attribute("meter") {
                    asset.unit_size = parser.parse_float(&meter)?;
                }
                parser.skip_element()
            }
            "up_axis" => {
                let text = parser.text_content()?;
                asset.up_axis = UpAxis::from_token(text.trim()).unwrap_or_else(|| {
                    log::warn!("Unknown up axis '{}', assuming Y_UP", text.trim());
                    UpAxis::Y
                });
                parser.verify_closing("up_axis")
            }
            _ => parser.skip_element(),
        })?;

        self.asset = asset;
        Ok(())
    }

    fn read_geometry_library(&mut self) -> ParseResult<()> {
        self.read_children("library_geometries", |parser, name| match name {
            "geometry" => parser.read_geometry(),
            _ => parser.skip_element(),
        })
    }

    /// Read a `<geometry>`, keeping the data sources of its mesh.
    fn read_geometry(&mut self) -> ParseResult<()> {
        let id = self.require_attribute("id")?;
        let name = self.optional_attribute("name");
        let mut sources = Vec::new();

        self.read_children("geometry", |parser, child| match child {
            "mesh" => parser.read_children("mesh", |parser, child| match child {
                "source" => {
                    sources.push(parser.read_source()?);
                    Ok(())
                }
                _ => parser.skip_element(),
            }),
            _ => parser.skip_element(),
        })?;

        if self.geometries.contains_key(&id) {
            return Err(self.error(ErrorKind::DuplicateId(id)));
        }
        self.geometries.insert(id.clone(), Geometry { id, name, sources });
        Ok(())
    }

    /// Read a `<source>`: its float array and its accessor.
    pub(super) fn read_source(&mut self) -> ParseResult<String> {
        let id = self.require_attribute("id")?;

        self.read_children("source", |parser, child| match child {
            "float_array" => parser.read_data_array(),
            "technique_common" => parser.read_children("technique_common", |parser, child| {
                match child {
                    "accessor" => {
                        if parser.accessors.contains_key(&id) {
                            return Err(parser.error(ErrorKind::DuplicateId(id.clone())));
                        }
                        let accessor = parser.read_accessor()?;
                        parser.accessors.insert(id.clone(), accessor);
                        Ok(())
                    }
                    _ => parser.skip_element(),
                }
            }),
            _ => parser.skip_element(),
        })?;

        Ok(id)
    }

    /// Read a `<float_array>` into the data library.
    pub(super) fn read_data_array(&mut self) -> ParseResult<()> {
        let id = self.require_attribute("id")?;
        let declared = self.optional_count("count")?;

        let values = if declared == Some(0) {
            self.skip_element()?;
            Vec::new()
        } else {
            let text = self.text_content()?;
            let values = self.parse_floats(&text)?;
            self.verify_closing("float_array")?;
            values
        };

        if let Some(count) = declared {
            if count != values.len() {
                log::warn!(
                    "float_array '{}' declares {} values but contains {}",
                    id,
                    count,
                    values.len()
                );
            }
        }

        if self.data.contains(&id) {
            return Err(self.error(ErrorKind::DuplicateId(id)));
        }
        self.data.insert(id, Data::new(values));
        Ok(())
    }

    /// Read an `<accessor>`. The source array is not looked up.
    pub(super) fn read_accessor(&mut self) -> ParseResult<Accessor> {
        let count = self.require_count("count")?;
        let offset = self.optional_count("offset")?.unwrap_or(0);
        let stride = self.optional_count("stride")?.unwrap_or(1);
        let source = strip_fragment(&self.require_attribute("source")?).to_string();
        let mut params = Vec::new();

        self.read_children("accessor", |parser, child| match child {
            "param" => {
                params.push(AccessorParam {
                    name: parser.optional_attribute("name"),
                    value_type: parser
                        .optional_attribute("type")
                        .unwrap_or_else(|| "float".to_string()),
                });
                parser.skip_element()
            }
            _ => parser.skip_element(),
        })?;

        Ok(Accessor {
            count,
            offset,
            stride,
            source,
            params,
        })
    }

    fn read_scene_library(&mut self) -> ParseResult<()> {
        self.read_children("library_visual_scenes", |parser, name| match name {
            "visual_scene" => {
                let scene = parser.read_node(None)?;
                parser.visual_scenes.push(scene);
                Ok(())
            }
            _ => parser.skip_element(),
        })
    }

    fn read_node_library(&mut self) -> ParseResult<()> {
        self.read_children("library_nodes", |parser, name| match name {
            "node" => parser.read_node(None).map(|_| ()),
            _ => parser.skip_element(),
        })
    }

    /// Read a `<node>` or `<visual_scene>` and its subtree.
    ///
    /// The node is linked under `parent`, or becomes a root. Its ID is
    /// registered once the closing tag has been read.
    pub(super) fn read_node(&mut self, parent: Option<NodeId>) -> ParseResult<NodeId> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ErrorKind::ExcessiveNesting {
                depth: self.depth + 1,
                max: self.options.max_depth,
            }));
        }

        let element = self.source.element_name().to_string();
        let id = if element == "visual_scene" {
            Some(self.require_attribute("id")?)
        } else {
            self.optional_attribute("id")
        };
        if let Some(key) = &id {
            if self.nodes.lookup(key).is_some() || self.ancestor_has_id(parent, key) {
                return Err(self.error(ErrorKind::DuplicateId(key.clone())));
            }
        }
        let name = self
            .optional_attribute("name")
            .or_else(|| id.clone())
            .unwrap_or_default();

        let node = Node {
            name,
            id: id.clone(),
            sid: self.optional_attribute("sid"),
            ..Default::default()
        };
        let handle = self.nodes.add_node(node, parent);

        self.depth += 1;
        let result = self.read_children(&element, |parser, child| {
            if let Some(kind) = TransformKind::from_element(child) {
                return parser.read_transform(handle, kind);
            }
            match child {
                "node" => parser.read_node(Some(handle)).map(|_| ()),
                "instance_geometry" => {
                    let url = parser.require_attribute("url")?;
                    parser.nodes[handle]
                        .geometry_instances
                        .push(strip_fragment(&url).to_string());
                    parser.skip_element()
                }
                "instance_node" => {
                    let url = parser.require_attribute("url")?;
                    parser.nodes[handle]
                        .node_instances
                        .push(strip_fragment(&url).to_string());
                    parser.skip_element()
                }
                _ => parser.skip_element(),
            }
        });
        self.depth -= 1;
        result?;

        if let Some(key) = id {
            if self.nodes.register(key.clone(), handle).is_err() {
                return Err(self.error(ErrorKind::DuplicateId(key)));
            }
        }
        Ok(handle)
    }

    /// Whether `node` or one of its ancestors still open carries `id`.
    fn ancestor_has_id(&self, mut node: Option<NodeId>, id: &str) -> bool {
        while let Some(current) = node {
            if self.nodes[current].id.as_deref() == Some(id) {
                return true;
            }
            node = self.nodes[current].parent;
        }
        false
    }

    /// Read one transform element and append it to `node`.
    pub(super) fn read_transform(&mut self, node: NodeId, kind: TransformKind) -> ParseResult<()> {
        let element = kind.element_name();
        let text = self.text_content()?;
        let values = self.parse_floats(&text)?;

        let transform = Transform::from_values(kind, &values).ok_or_else(|| {
            self.error(ErrorKind::MalformedDocument(format!(
                "<{element}> expects {} values, found {}",
                kind.arity(),
                values.len()
            )))
        })?;
        self.verify_closing(element)?;

        self.nodes[node].transforms.push(transform);
        Ok(())
    }

    /// Read `<scene>` and select the referenced visual scene as root.
    pub(super) fn read_scene(&mut self) -> ParseResult<()> {
        self.read_children("scene", |parser, name| match name {
            "instance_visual_scene" => {
                let url = parser.require_attribute("url")?;
                let key = strip_fragment(&url);
                let root = parser
                    .nodes
                    .lookup(key)
                    .ok_or_else(|| parser.error(ErrorKind::UnresolvedReference(key.to_string())))?;
                parser.root = Some(root);
                parser.skip_element()
            }
            _ => parser.skip_element(),
        })
    }
}
