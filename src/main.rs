use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use imagegen_client::mime::{extension_for_mime, resolve_image_mime};
use imagegen_client::{
    CancellationToken, CaptionRequest, EditRequest, GenerationRequest, ImageClient, ImagePart,
    ImageResponse, ModelFamily, ModelSettings,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "imagegen")]
#[command(about = "Generate, edit and caption images with hosted models")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate images from a text prompt.
    Generate(GenerateArgs),
    /// Edit an existing image, optionally restricted by a mask.
    Edit(EditArgs),
    /// Describe an image in natural language.
    Caption(CaptionArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long, default_value = "gpt-image-1", value_parser = parse_family)]
    model: ModelFamily,
    #[arg(long)]
    prompt: String,
    #[arg(long)]
    negative_prompt: Option<String>,
    #[arg(long)]
    size: Option<String>,
    #[arg(long)]
    quality: Option<String>,
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    format: Option<String>,
    #[arg(long, default_value_t = 1)]
    count: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Debug, Args)]
struct EditArgs {
    #[arg(long)]
    image: PathBuf,
    #[arg(long)]
    mask: Option<PathBuf>,
    #[arg(long)]
    prompt: String,
    #[arg(long)]
    size: Option<String>,
    #[arg(long)]
    quality: Option<String>,
    #[arg(long)]
    format: Option<String>,
    #[arg(long, default_value_t = 1)]
    count: u32,
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Debug, Args)]
struct CaptionArgs {
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    image: Option<PathBuf>,
    #[arg(long)]
    url: Option<String>,
    /// Caption individual regions instead of the whole image.
    #[arg(long)]
    dense: bool,
    #[arg(long)]
    gender_neutral: bool,
    #[arg(long)]
    language: Option<String>,
}

fn parse_family(input: &str) -> std::result::Result<ModelFamily, String> {
    input.parse().map_err(|e: imagegen_client::Error| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagegen_client=info,imagegen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            trigger.cancel();
        }
    });

    let client = ImageClient::new()?;
    if let Err(e) = run(&client, args.command, &cancel).await {
        error!("imagegen failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(client: &ImageClient, command: Command, cancel: &CancellationToken) -> Result<()> {
    match command {
        Command::Generate(args) => {
            let descriptor = ModelSettings::from_env(args.model)?.into_descriptor()?;
            let mut request = GenerationRequest::new(args.prompt).with_count(args.count);
            if let Some(negative) = args.negative_prompt {
                request = request.with_negative_prompt(negative);
            }
            if let Some(size) = args.size {
                request = request.with_size(size);
            }
            if let Some(quality) = args.quality {
                request = request.with_quality(quality);
            }
            if let Some(style) = args.style {
                request = request.with_style(style);
            }
            if let Some(format) = args.format {
                request = match args.model {
                    ModelFamily::DallE3 => request.with_response_format(format),
                    _ => request.with_output_format(format),
                };
            }
            if let Some(seed) = args.seed {
                request = request.with_seed(seed);
            }

            let response = client
                .generate_with_cancellation(descriptor.generation()?, &request, cancel)
                .await?;
            let format = request
                .output_format
                .as_deref()
                .or(descriptor.defaults().output_format.as_deref());
            save_images(client, &response, format, &args.output_dir, cancel).await?;
        }
        Command::Edit(args) => {
            let descriptor = ModelSettings::from_env(ModelFamily::GptImage1)?.into_descriptor()?;
            let mut request = EditRequest::new(args.prompt, read_part(&args.image)?)
                .with_count(args.count);
            if let Some(mask) = &args.mask {
                request = request.with_mask(read_part(mask)?);
            }
            if let Some(size) = args.size {
                request = request.with_size(size);
            }
            if let Some(quality) = args.quality {
                request = request.with_quality(quality);
            }
            if let Some(format) = args.format {
                request = request.with_output_format(format);
            }

            let response = client
                .edit_with_cancellation(descriptor.editing()?, &request, cancel)
                .await?;
            let format = request
                .output_format
                .as_deref()
                .or(descriptor.defaults().output_format.as_deref());
            save_images(client, &response, format, &args.output_dir, cancel).await?;
        }
        Command::Caption(args) => {
            let descriptor = ModelSettings::from_env(ModelFamily::Florence)?.into_descriptor()?;
            let mut request = match (&args.url, &args.image) {
                (Some(url), _) => CaptionRequest::from_url(url.clone()),
                (None, Some(path)) => CaptionRequest::from_bytes(
                    std::fs::read(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                (None, None) => anyhow::bail!("Either --image or --url is required"),
            };
            request = request.with_gender_neutral(args.gender_neutral);
            if let Some(language) = args.language {
                request = request.with_language(language);
            }

            let model = descriptor.captioning()?;
            let json = if args.dense {
                let result = client
                    .dense_captions_with_cancellation(model, &request, cancel)
                    .await?;
                serde_json::to_string_pretty(&result)?
            } else {
                let result = client
                    .caption_with_cancellation(model, &request, cancel)
                    .await?;
                serde_json::to_string_pretty(&result)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn read_part(path: &Path) -> Result<ImagePart> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.png".to_string());
    Ok(ImagePart::new(data, filename))
}

/// Writes every image to `output_dir` and prints each path on stdout.
async fn save_images(
    client: &ImageClient,
    response: &ImageResponse,
    format: Option<&str>,
    output_dir: &Path,
    cancel: &CancellationToken,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for image in &response.images {
        let bytes = client.image_bytes_with_cancellation(image, cancel).await?;
        let path = output_path(output_dir, &bytes, format);
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {}", path.display());
        println!("{}", path.display());
    }
    Ok(())
}

fn output_path(output_dir: &Path, bytes: &[u8], format: Option<&str>) -> PathBuf {
    let ext = extension_for_mime(resolve_image_mime(bytes, format));
    output_dir.join(format!("{}.{}", Uuid::new_v4(), ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagegen_client::ModelDescriptor;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_family_accepts_aliases() {
        assert_eq!(parse_family("dall-e-3").unwrap(), ModelFamily::DallE3);
        assert_eq!(parse_family("SD3.5").unwrap(), ModelFamily::StableDiffusion35);
    }

    #[test]
    fn test_parse_family_rejects_unknown() {
        let err = parse_family("midjourney").unwrap_err();
        assert!(err.contains("midjourney"));
    }

    #[test]
    fn test_caption_requires_a_source() {
        assert!(CliArgs::try_parse_from(["imagegen", "caption"]).is_err());
        assert!(
            CliArgs::try_parse_from(["imagegen", "caption", "--url", "https://x/cat.png"]).is_ok()
        );
    }

    #[test]
    fn test_output_path_uses_detected_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), &[0xFF, 0xD8, 0xFF, 0xE0], None);
        assert_eq!(path.extension().unwrap(), "jpg");
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_output_path_prefers_requested_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), &[0x89, 0x50, 0x4E, 0x47], Some("webp"));
        assert_eq!(path.extension().unwrap(), "webp");
    }

    #[tokio::test]
    async fn test_save_images_writes_each_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "b64_json": "iVBORw==" }, { "b64_json": "iVBORw==" }]
            })))
            .mount(&server)
            .await;

        let descriptor = ModelDescriptor::builder(ModelFamily::GptImage1)
            .endpoint(server.uri())
            .credential("k")
            .deployment("gpt-image-1")
            .build()
            .unwrap();
        let client = ImageClient::new().unwrap();
        let response = client
            .generate(
                descriptor.generation().unwrap(),
                &GenerationRequest::new("a cat").with_count(2),
            )
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        save_images(
            &client,
            &response,
            Some("webp"),
            dir.path(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(written.len(), 2);
        for path in written {
            assert_eq!(path.extension().unwrap(), "webp");
            assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
        }
    }

    #[test]
    fn test_read_part_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cat.png");
        std::fs::write(&file, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let part = read_part(&file).unwrap();
        assert_eq!(part.filename.as_deref(), Some("cat.png"));
        assert_eq!(part.data.len(), 4);
    }
}
