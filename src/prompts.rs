//! Prompt text for the four chat-call shapes: keyword extraction, per-article
//! summarization, report synthesis, and the assisted-extraction fallback.
//!
//! The report targets Korean-language coverage, so the instructions are in
//! Korean; the response grammars (line-per-keyword, `###`/`*` markdown, JSON)
//! are what the rest of the pipeline parses.

/// System instruction for keyword extraction.
pub const KEYWORD_SYSTEM: &str =
    "당신은 핵심 키워드 추출 전문가입니다. 기사를 가장 잘 나타내는 키워드를 정확히 추출하세요.";

/// User prompt for keyword extraction.
pub fn keyword_user(title: &str, body: &str, max_keywords: usize) -> String {
    format!(
        "다음은 뉴스의 제목과 본문입니다. 이 기사의 핵심 주제를 가장 잘 나타내는 키워드 {max_keywords}개를 한글로 추출해주세요.\n\
         - 제목에 등장하는 단어나 표현을 우선 고려해 키워드를 선택해주세요.\n\
         - 본문 전체를 참고하되, 주제를 잘 대표하는 단어를 뽑아주세요.\n\
         - 각 키워드는 명사 형태로 간결하게, 한 줄에 하나씩 제시해주세요.\n\n\
         제목: {title}\n본문: {body}"
    )
}

/// System instruction for per-article summarization.
pub const SUMMARY_SYSTEM: &str =
    "당신은 뉴스 분석가입니다. 기사의 핵심만 정확하게 추출하여 요약합니다.";

/// User prompt for per-article summarization. The four fixed bullets give
/// every summary the same shape, which keeps the packed synthesis input
/// uniform.
pub fn summary_user(title: &str, body: &str) -> String {
    format!(
        "다음 뉴스 기사의 핵심 내용을 아래 항목에 맞추어 간결하게 요약해줘. 각 항목은 한두 문장으로 작성해줘.\n\
         - **사건/주제**: \n- **주요 인물/기관**: \n- **핵심 주장/내용**: \n- **결과/영향**:\n\
         ---\n\
         제목: {title}\n본문: {body}"
    )
}

/// System instruction for report synthesis.
pub const REPORT_SYSTEM: &str =
    "당신은 여러 정보를 종합하여 깊이 있는 인사이트를 도출하는 전문 분석가입니다.";

/// User prompt for report synthesis, wrapping the packed per-article
/// summaries. The four-section structure and bullet-only rule are what
/// the renderer's line grammar expects.
pub fn report_user(packed_summaries: &str) -> String {
    format!(
        "당신은 정치/경제/산업 분야의 최고 수준의 전문 분석가입니다. 여러 뉴스 기사의 핵심 요약본들을 바탕으로, \
         회사 CFO나 CEO가 의사결정을 위해 참고할 심층 분석 보고서를 작성합니다.\n\
         다음 구조를 반드시 지켜 보고서를 작성해주세요. 각 섹션의 본문은 `* `로 시작하는 불릿 목록만 사용하고, \
         전체 분량은 공백 포함 2,000자 내외로 작성합니다.\n\
         1.  **📌 Executive Summary (핵심 요약)**\n\
             *   전체 상황을 1~2 문장으로 요약합니다.\n\
         2.  **📰 Key Developments (주요 동향 및 사실 분석)**\n\
             *   어떤 사건/행동이 있었는지 종합적으로 설명합니다.\n\
             *   공통적으로 드러나는 원인과 배경은 무엇입니까?\n\
             *   핵심적인 플레이어(인물, 기업, 기관)는 누구이며, 그들의 입장은 무엇입니까?\n\
         3.  **📊 Comparative Analysis (비교 분석 및 이슈 심층 탐구)**\n\
             *   기사들 간의 관점 차이나 상충되는 정보가 있다면 비교 분석합니다.\n\
         4.  **🧠 Conclusion & Strategic Implications (결론 및 전략적 시사점)**\n\
             *   이러한 흐름이 향후 시장/산업/정책에 미칠 영향은 무엇입니까?\n\
             *   우리 조직이 주의 깊게 관찰해야 할 리스크와 기회 요인은 무엇입니까?\n\
         ---\n\
         {packed_summaries}"
    )
}

/// System instruction for the LLM-assisted extraction fallback.
pub const EXTRACT_SYSTEM: &str =
    "당신은 웹 페이지에서 기사 본문을 추출하는 도구입니다. 반드시 JSON 객체 하나만 출력하세요.";

/// User prompt for assisted extraction: page text in, `{"title","body"}` out.
pub fn extract_user(page_text: &str) -> String {
    format!(
        "아래는 뉴스 페이지에서 추출한 텍스트입니다. 기사 제목과 본문만 골라내어 \
         {{\"title\": \"...\", \"body\": \"...\"}} 형식의 JSON으로 응답하세요. \
         광고, 메뉴, 추천 기사 목록은 제외합니다. 본문이 없으면 body를 빈 문자열로 두세요.\n\n{page_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_user_carries_count_and_content() {
        let p = keyword_user("제목A", "본문B", 5);
        assert!(p.contains("키워드 5개"));
        assert!(p.contains("제목: 제목A"));
        assert!(p.contains("본문: 본문B"));
    }

    #[test]
    fn test_report_user_embeds_packed_summaries() {
        let p = report_user("### 뉴스 1: t\ns\n---\n");
        assert!(p.contains("### 뉴스 1: t"));
        assert!(p.contains("📌 Executive Summary"));
        assert!(p.contains("🧠 Conclusion"));
    }

    #[test]
    fn test_extract_user_is_json_shaped() {
        let p = extract_user("page text");
        assert!(p.contains("{\"title\": \"...\", \"body\": \"...\"}"));
        assert!(p.ends_with("page text"));
    }
}
