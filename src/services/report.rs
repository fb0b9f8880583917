//! 报告渲染服务
//!
//! 先生成确定性的文本行，再排版为 A4 PDF。同一份记录总是得到相同的文本内容，
//! PDF 中提取出的文本与这些行逐字一致。

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use ttf_parser::Face;

use crate::config::config::ReportConfig;
use crate::error::{AppError, Result};
use crate::models::PatientRecord;

pub const REPORT_TITLE: &str = "Relatório do paciente";
pub const RESULTS_HEADER: &str = "Resultados:";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 280.0;
const MARGIN_BOTTOM: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineStyle {
    Title,
    Heading,
    Body,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 16.0,
            LineStyle::Heading => 12.0,
            LineStyle::Body => 11.0,
        }
    }
}

struct ReportLine {
    text: String,
    style: LineStyle,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

fn layout(record: &PatientRecord) -> Vec<ReportLine> {
    let attributes = &record.attributes;
    let mut lines = Vec::with_capacity(4 + record.results.len() * 3);

    lines.push(ReportLine::new(LineStyle::Title, REPORT_TITLE));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Nome do paciente: {}", attributes.patient_name()),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Data de avaliação: {}", attributes.evaluation_date()),
    ));
    lines.push(ReportLine::new(LineStyle::Heading, RESULTS_HEADER));

    for result in &record.results {
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!("  Articulação: {}", result.name),
        ));
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!("  Valor encontrado: {}", result.value),
        ));
        lines.push(ReportLine::new(LineStyle::Body, ""));
    }

    lines
}

/// 报告的文本内容，按出现顺序
pub fn report_lines(record: &PatientRecord) -> Vec<String> {
    layout(record).into_iter().map(|line| line.text).collect()
}

/// WinAnsiEncoding 中超出 Latin-1 的字符（0x80..0x9F 区段）
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// 内置 Helvetica 字体能够编码的字符
fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A1}'..='\u{AC}' | '\u{AE}'..='\u{FF}')
        || WIN_ANSI_EXTRAS.contains(c)
}

#[derive(Clone)]
enum ReportFont {
    /// Helvetica / Helvetica-Bold，仅覆盖 WinAnsi 字符集
    Builtin,
    /// 嵌入的 TrueType 字体
    Embedded(Arc<Vec<u8>>),
}

/// 报告渲染器
///
/// 字体无法表示的字符会导致渲染失败，而不是被静默丢弃，
/// 因此 PDF 中可提取的文本总是与 [`report_lines`] 一致。
#[derive(Clone)]
pub struct ReportRenderer {
    font: ReportFont,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ReportRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let font = match &self.font {
            ReportFont::Builtin => "builtin",
            ReportFont::Embedded(_) => "embedded",
        };
        f.debug_struct("ReportRenderer").field("font", &font).finish()
    }
}

impl ReportRenderer {
    /// 使用 PDF 内置字体
    pub fn builtin() -> Self {
        Self {
            font: ReportFont::Builtin,
        }
    }

    /// 按配置选择字体：配置了 `font_path` 时嵌入该字体
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        match &config.font_path {
            Some(path) => Self::from_font_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// 从文件加载 TrueType 字体
    pub fn from_font_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::Config(format!("无法读取报告字体 {}: {e}", path.display()))
        })?;
        Self::from_font_bytes(bytes)
    }

    /// 使用内存中的 TrueType 字体数据
    pub fn from_font_bytes(bytes: Vec<u8>) -> Result<Self> {
        Face::parse(&bytes, 0).map_err(|e| AppError::Config(format!("报告字体无效: {e}")))?;
        Ok(Self {
            font: ReportFont::Embedded(Arc::new(bytes)),
        })
    }

    /// 检查每一行都能被当前字体完整表示
    fn check_coverage(&self, lines: &[ReportLine]) -> Result<()> {
        let unsupported = match &self.font {
            ReportFont::Builtin => lines
                .iter()
                .flat_map(|line| line.text.chars())
                .find(|c| !is_win_ansi(*c)),
            ReportFont::Embedded(bytes) => {
                let face = Face::parse(bytes, 0)
                    .map_err(|e| AppError::Render(format!("PDF font error: {e}")))?;
                lines
                    .iter()
                    .flat_map(|line| line.text.chars())
                    .find(|c| face.glyph_index(*c).is_none())
            }
        };

        match unsupported {
            Some(c) => Err(AppError::Render(format!(
                "character {c:?} (U+{:04X}) is not supported by the report font",
                c as u32
            ))),
            None => Ok(()),
        }
    }

    /// 将患者记录渲染为 PDF 字节
    pub fn render(&self, record: &PatientRecord) -> Result<Vec<u8>> {
        let lines = layout(record);
        self.check_coverage(&lines)?;

        let (doc, page1, layer1) = PdfDocument::new(
            REPORT_TITLE,
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let (regular, bold) = match &self.font {
            ReportFont::Builtin => (
                doc.add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| AppError::Render(format!("PDF font error: {e}")))?,
                doc.add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(|e| AppError::Render(format!("PDF font error: {e}")))?,
            ),
            ReportFont::Embedded(bytes) => {
                let font = doc
                    .add_external_font(bytes.as_slice())
                    .map_err(|e| AppError::Render(format!("PDF font error: {e}")))?;
                (font.clone(), font)
            }
        };

        let mut layer = doc.get_page(page1).get_layer(layer1);
        let mut y = MARGIN_TOP;

        for line in lines {
            if y < MARGIN_BOTTOM {
                let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = MARGIN_TOP;
            }

            if !line.text.is_empty() {
                let font: &IndirectFontRef = match line.style {
                    LineStyle::Body => &regular,
                    LineStyle::Title | LineStyle::Heading => &bold,
                };
                layer.use_text(line.text, line.style.font_size(), Mm(MARGIN_LEFT), Mm(y), font);
            }

            y -= match line.style {
                LineStyle::Title => LINE_HEIGHT * 2.0,
                _ => LINE_HEIGHT,
            };
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| AppError::Render(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| AppError::Render(format!("PDF buffer error: {e}")))
    }
}

/// 使用内置字体渲染报告
pub fn render_report(record: &PatientRecord) -> Result<Vec<u8>> {
    ReportRenderer::builtin().render(record)
}
