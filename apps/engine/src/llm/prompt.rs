//! Per-kind instruction prompts.
//!
//! Each prompt embeds the input text and parameters and instructs the model
//! to answer in a fixed-schema JSON object, so the extraction step has
//! something to find.

use crate::models::AnalysisKind;

use super::provider::ProviderTask;

/// System message for chat-style backends.
pub const SYSTEM_PROMPT: &str = "你是一个专业的文本分析助手，请按照要求分析文本。";

/// Build the instruction prompt for one task.
pub fn build_prompt(task: &ProviderTask) -> String {
    let base = format!("请分析以下文本，要求：\n\n文本内容：{}\n\n", task.text);

    match task.kind {
        AnalysisKind::Sentiment => format!(
            "{base}请进行情感分析，分析结果请以JSON格式返回，包含以下字段：\n\
             - sentiment: 情感倾向（积极/消极/中性）\n\
             - score: 情感得分（0-1之间的小数）\n\
             - confidence: 置信度（高/中/低）\n\
             - reasoning: 分析理由（简要说明）\n\n\
             请确保返回的是有效的JSON格式。"
        ),
        AnalysisKind::Keywords => format!(
            "{base}请提取关键词，要求：\n\
             - 提取{top_k}个最重要的关键词\n\
             - 分析结果请以JSON格式返回，包含以下字段：\n\
               - keywords: 关键词列表，每个关键词包含word和weight字段\n\
               - reasoning: 提取理由（简要说明）\n\n\
             请确保返回的是有效的JSON格式。",
            top_k = task.top_k
        ),
        AnalysisKind::Summary => format!(
            "{base}请生成文本摘要，要求：\n\
             - 摘要长度控制在{max_length}字以内\n\
             - 保持原文的核心信息和逻辑结构\n\
             - 分析结果请以JSON格式返回，包含以下字段：\n\
               - summary: 摘要内容\n\
               - length: 摘要长度\n\
               - original_length: 原文长度\n\
               - compression_ratio: 压缩比\n\
               - key_points: 关键要点列表\n\n\
             请确保返回的是有效的JSON格式。",
            max_length = task.max_length
        ),
        AnalysisKind::Similarity => format!(
            "{base}请分析两段文本的相似度，要求：\n\
             - 文本1: {text1}\n\
             - 文本2: {text2}\n\
             - 分析结果请以JSON格式返回，包含以下字段：\n\
               - similarity_score: 相似度得分（0-1之间的小数）\n\
               - similarity_percentage: 相似度百分比\n\
               - interpretation: 相似度解释（高度相似/中度相似/低度相似）\n\
               - reasoning: 分析理由（简要说明）\n\n\
             请确保返回的是有效的JSON格式。",
            text1 = task.text,
            text2 = task.second_text.as_deref().unwrap_or_default()
        ),
    }
}
