use crate::cli::OutputFormat;
use crate::youtube::{Transcript, VideoId, VideoMetadata};

/// Player width used when the metadata carries no thumbnail width
const DEFAULT_PLAYER_WIDTH: u32 = 480;

/// Maximum number of highlights requested from the model
pub const MAX_HIGHLIGHTS: usize = 10;

/// Compose the summarization prompt for a video.
///
/// Pure function of its inputs: the same transcript, metadata, id and format
/// always produce the same text.
pub fn build_prompt(
    transcript: &Transcript,
    metadata: &VideoMetadata,
    video_id: &VideoId,
    format: OutputFormat,
) -> String {
    let title = metadata.title_or_default(video_id);
    let (width, height) = player_size(metadata);

    // Plain data: serialization cannot fail
    let transcript_json = serde_json::to_string(&transcript.segments).unwrap_or_default();
    let metadata_json = serde_json::to_string_pretty(metadata).unwrap_or_default();

    format!(
        r#"You are a wry, entertaining summarizer of YouTube videos. You are accurate about what was said, but you are allowed to have fun saying it.

This is a transcript of the YouTube video "{title}" with id {id}.
From this transcript and the metadata that follows it, generate a {format} document containing the following:
1. A one line description of the video
2. A single paragraph summary of the main content
3. A summary of conclusions (if any)
4. Up to {max_highlights} key highlights or important points from the video, each with a link to the video at that time, using links of the form {timestamp_link} where <seconds> is the start offset from the transcript
5. If the title implies a list (for example it contains "Top N"), the items of that list, each with a timestamped link in the same form
6. The video embedded at the end of the document using this iframe: <iframe width="{width}" height="{height}" src="{embed_url}" frameborder="0" allowfullscreen></iframe>

Also comment on how well the title matches the actual content of the video, and call out any clickbait framing in the title.
Respond with the {format} document only.

Transcript: {transcript_json}

Metadata: {metadata_json}
"#,
        title = title,
        id = video_id,
        format = format,
        max_highlights = MAX_HIGHLIGHTS,
        timestamp_link = video_id.watch_url_at("<seconds>"),
        width = width,
        height = height,
        embed_url = video_id.embed_url(),
        transcript_json = transcript_json,
        metadata_json = metadata_json,
    )
}

/// Embedded player size: thumbnail width at a 16:9 ratio
fn player_size(metadata: &VideoMetadata) -> (u32, u32) {
    let width = metadata
        .thumbnail_width
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_PLAYER_WIDTH);
    let height = u64::from(width) * 9 / 16;
    (width, height as u32)
}
