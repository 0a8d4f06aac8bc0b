//! 注册文档字段抽取服务 - 业务能力层
//!
//! 只负责"一份 XML 文档 → 一条 TrialRecord"，不关心批量流程。
//!
//! 抽取规则：
//! - 普通字段：按标签名查找所有元素，0 个为 `""`，1 个为字符串，多个为字符串列表
//! - PMID：每个 `reference` 下的 PMID 文本，始终为列表
//! - 结局指标：每个该类别元素取 `measure` / `time_frame` / `description`，缺失为 `""`
//!
//! 任何字段抽取失败都只退化为该字段的默认值，不影响其余字段。

use crate::error::{AppError, AppResult, ParseError};
use crate::models::{FieldValue, OutcomeCategory, OutcomeMeasure, TrialRecord};
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;
use tracing::warn;

/// 字段抽取服务
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordExtractor;

impl RecordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 读取并抽取一份文档
    ///
    /// 只有读取文件失败才返回错误；内容不是合法 XML 时返回全部为默认值的记录。
    pub fn extract_file(&self, path: &Path) -> AppResult<TrialRecord> {
        let bytes = std::fs::read(path).map_err(|e| AppError::io(path, e))?;
        let text = decode_document(bytes, path);
        Ok(self.extract_str(&text, path))
    }

    /// 从 XML 文本抽取记录，`source` 仅用于日志
    pub fn extract_str(&self, xml: &str, source: &Path) -> TrialRecord {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        match Document::parse_with_options(xml, options) {
            Ok(doc) => Registration { doc: &doc, source }.to_record(),
            Err(e) => {
                warn!(
                    "{}，所有字段使用默认值",
                    ParseError::MalformedXml {
                        path: source.to_path_buf(),
                        source: e,
                    }
                );
                TrialRecord::default()
            }
        }
    }
}

/// 按 UTF-8 解码文档，非法字节替换为 U+FFFD 并记警告
fn decode_document(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "文档不是合法的 UTF-8 ({}): {}，非法字节已替换",
                path.display(),
                e.utf8_error()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// 已解析的注册文档
struct Registration<'a, 'input> {
    doc: &'a Document<'input>,
    source: &'a Path,
}

impl<'a, 'input> Registration<'a, 'input> {
    fn to_record(&self) -> TrialRecord {
        TrialRecord {
            nct_id: self.string_field("nct_id"),
            brief_title: self.string_field("brief_title"),
            official_title: self.string_field("official_title"),
            overall_status: self.string_field("overall_status"),

            start_date: self.string_field("start_date"),
            completion_date: self.string_field("completion_date"),
            study_first_posted: self.string_field("study_first_posted"),
            study_first_submitted: self.string_field("study_first_submitted"),
            last_update_submitted: self.string_field("last_update_submitted"),
            verification_date: self.string_field("verification_date"),

            phase: self.string_field("phase"),
            study_type: self.string_field("study_type"),
            primary_purpose: self.string_field("primary_purpose"),
            condition: self.string_field("condition"),
            enrollment: self.string_field("enrollment"),
            gender: self.string_field("gender"),
            minimum_age: self.string_field("minimum_age"),
            maximum_age: self.string_field("maximum_age"),

            pmid: self.pmids(),

            primary_outcome: self.outcomes(OutcomeCategory::Primary),
            secondary_outcome: self.outcomes(OutcomeCategory::Secondary),
            other_outcome: self.outcomes(OutcomeCategory::Other),
            url: self.string_field("url"),
        }
    }

    /// 文档中所有名为 `tag` 的元素（文档顺序）
    fn elements(&self, tag: &'a str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.doc
            .descendants()
            .filter(move |n| n.is_element() && n.tag_name().name() == tag)
    }

    fn string_field(&self, tag: &'a str) -> FieldValue {
        self.elements(tag).map(text_of).collect::<Vec<_>>().into()
    }

    fn pmids(&self) -> Vec<String> {
        let mut pmids = Vec::new();
        for reference in self.elements("reference") {
            match first_descendant(reference, |name| name.eq_ignore_ascii_case("pmid")) {
                Some(pmid) => pmids.push(text_of(pmid)),
                None => {
                    warn!(
                        "{}: reference 缺少 PMID，PMID 字段使用默认值",
                        self.source.display()
                    );
                    return Vec::new();
                }
            }
        }
        pmids
    }

    fn outcomes(&self, category: OutcomeCategory) -> Vec<OutcomeMeasure> {
        self.elements(category.tag())
            .map(|outcome| OutcomeMeasure {
                measure: child_text(outcome, "measure"),
                time_frame: child_text(outcome, "time_frame"),
                description: child_text(outcome, "description"),
            })
            .collect()
    }
}

/// 元素的全部文本（拼接所有后代文本节点，不去除空白）
fn text_of(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// `node` 之下第一个满足条件的后代元素（不含自身）
fn first_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    matches: impl Fn(&str) -> bool,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && matches(n.tag_name().name()))
}

fn child_text(node: Node, tag: &str) -> String {
    first_descendant(node, |name| name == tag)
        .map(text_of)
        .unwrap_or_default()
}
