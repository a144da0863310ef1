//! Canvas presentation through a buffer-to-image copy
//!
//! Each frame the canvas bytes are written to a mapped staging buffer and
//! copied into the acquired swapchain image. One frame is in flight at a time.

use ash::vk;

use super::buffer::StagingBuffer;
use super::commands::CommandPool;
use super::context::VulkanContext;
use super::swapchain::Swapchain;
use super::sync::{Fence, Semaphore};
use super::{VulkanError, VulkanResult};
use crate::render::canvas::Canvas;
use crate::render::window::WindowHandle;
use crate::render::{FramePresenter, PresentError, PresentOutcome};

const COLOR_RANGE: vk::ImageSubresourceRange = vk::ImageSubresourceRange {
    aspect_mask: vk::ImageAspectFlags::COLOR,
    base_mip_level: 0,
    level_count: 1,
    base_array_layer: 0,
    layer_count: 1,
};

/// Presents software canvases on a Vulkan swapchain
///
/// The context is declared last so every other handle is destroyed before
/// the device and instance it came from.
pub struct VulkanPresenter {
    vsync: bool,
    needs_recreate: bool,
    framebuffer_size: (u32, u32),
    staging: Option<StagingBuffer>,
    command_buffer: vk::CommandBuffer,
    command_pool: CommandPool,
    in_flight: Fence,
    image_available: Semaphore,
    render_finished: Vec<Semaphore>,
    swapchain: Swapchain,
    context: VulkanContext,
}

impl VulkanPresenter {
    /// Create a presenter for the window's surface
    pub fn new(window: &mut WindowHandle, app_name: &str, vsync: bool) -> VulkanResult<Self> {
        let framebuffer_size = window.get_framebuffer_size();
        let glfw_window = window
            .glfw_window_mut()
            .ok_or_else(|| VulkanError::InitializationFailed("Window has no Vulkan-capable backend".to_string()))?;

        let context = VulkanContext::new(glfw_window, app_name)?;
        let swapchain = Swapchain::new(&context, to_extent(framebuffer_size), vsync, None)?;

        let device = context.raw_device();
        let render_finished = create_semaphores(&device, swapchain.images().len())?;
        let image_available = Semaphore::new(device.clone())?;
        let in_flight = Fence::new(device.clone(), true)?;
        let command_pool = CommandPool::new(device, context.physical_device.graphics_family)?;
        let command_buffer = command_pool
            .allocate_command_buffers(1)?
            .into_iter()
            .next()
            .ok_or_else(|| VulkanError::InitializationFailed("No command buffer allocated".to_string()))?;

        log::info!("Vulkan presenter ready (vsync: {})", vsync);

        Ok(Self {
            vsync,
            needs_recreate: false,
            framebuffer_size,
            staging: None,
            command_buffer,
            command_pool,
            in_flight,
            image_available,
            render_finished,
            swapchain,
            context,
        })
    }

    /// Current swapchain extent in pixels
    pub fn extent(&self) -> (u32, u32) {
        let extent = self.swapchain.extent();
        (extent.width, extent.height)
    }

    fn recreate_swapchain(&mut self) -> VulkanResult<()> {
        self.context.wait_idle()?;

        let swapchain = Swapchain::new(
            &self.context,
            to_extent(self.framebuffer_size),
            self.vsync,
            Some(&self.swapchain),
        )?;
        let image_count = swapchain.images().len();
        self.swapchain = swapchain;

        if image_count != self.render_finished.len() {
            self.render_finished = create_semaphores(&self.context.raw_device(), image_count)?;
        }

        self.needs_recreate = false;
        log::debug!(
            "Swapchain recreated for {}x{}",
            self.framebuffer_size.0,
            self.framebuffer_size.1
        );
        Ok(())
    }

    fn ensure_staging(&mut self, size: usize) -> VulkanResult<&mut StagingBuffer> {
        let too_small = self.staging.as_ref().map_or(true, |staging| staging.size() < size);
        if too_small {
            // Fence has been waited, so the old buffer is idle
            self.staging = None;
            self.staging = Some(StagingBuffer::new(
                self.context.raw_device(),
                &self.context.physical_device,
                size,
            )?);
        }
        self.staging
            .as_mut()
            .ok_or_else(|| VulkanError::InitializationFailed("Staging buffer missing".to_string()))
    }

    fn record_copy(&self, image: vk::Image, buffer: vk::Buffer, canvas_size: (u32, u32)) -> VulkanResult<()> {
        let device = &self.context.device.device;
        let cmd = self.command_buffer;
        let extent = self.swapchain.extent();

        let begin_info = vk::CommandBufferBeginInfo::builder().flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

        let to_transfer = vk::ImageMemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::empty())
            .dst_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .old_layout(vk::ImageLayout::UNDEFINED)
            .new_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL)
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(image)
            .subresource_range(COLOR_RANGE)
            .build();

        let clear_to_copy = vk::ImageMemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .dst_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .old_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL)
            .new_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL)
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(image)
            .subresource_range(COLOR_RANGE)
            .build();

        let to_present = vk::ImageMemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .dst_access_mask(vk::AccessFlags::empty())
            .old_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL)
            .new_layout(vk::ImageLayout::PRESENT_SRC_KHR)
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(image)
            .subresource_range(COLOR_RANGE)
            .build();

        let black = vk::ClearColorValue {
            float32: [0.0, 0.0, 0.0, 1.0],
        };

        let (copy_width, copy_height) = copy_extent(canvas_size, (extent.width, extent.height));
        let region = vk::BufferImageCopy::builder()
            .buffer_offset(0)
            .buffer_row_length(canvas_size.0)
            .buffer_image_height(canvas_size.1)
            .image_subresource(vk::ImageSubresourceLayers {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                mip_level: 0,
                base_array_layer: 0,
                layer_count: 1,
            })
            .image_offset(vk::Offset3D { x: 0, y: 0, z: 0 })
            .image_extent(vk::Extent3D {
                width: copy_width,
                height: copy_height,
                depth: 1,
            })
            .build();

        unsafe {
            device
                .reset_command_buffer(cmd, vk::CommandBufferResetFlags::empty())
                .map_err(VulkanError::Api)?;
            device.begin_command_buffer(cmd, &begin_info).map_err(VulkanError::Api)?;

            device.cmd_pipeline_barrier(
                cmd,
                vk::PipelineStageFlags::TOP_OF_PIPE,
                vk::PipelineStageFlags::TRANSFER,
                vk::DependencyFlags::empty(),
                &[],
                &[],
                &[to_transfer],
            );

            device.cmd_clear_color_image(
                cmd,
                image,
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                &black,
                &[COLOR_RANGE],
            );

            device.cmd_pipeline_barrier(
                cmd,
                vk::PipelineStageFlags::TRANSFER,
                vk::PipelineStageFlags::TRANSFER,
                vk::DependencyFlags::empty(),
                &[],
                &[],
                &[clear_to_copy],
            );

            if copy_width > 0 && copy_height > 0 {
                device.cmd_copy_buffer_to_image(
                    cmd,
                    buffer,
                    image,
                    vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                    &[region],
                );
            }

            device.cmd_pipeline_barrier(
                cmd,
                vk::PipelineStageFlags::TRANSFER,
                vk::PipelineStageFlags::BOTTOM_OF_PIPE,
                vk::DependencyFlags::empty(),
                &[],
                &[],
                &[to_present],
            );

            device.end_command_buffer(cmd).map_err(VulkanError::Api)?;
        }

        Ok(())
    }

    fn draw(&mut self, canvas: &Canvas) -> Result<PresentOutcome, PresentError> {
        let device = self.context.raw_device();

        self.in_flight.wait(u64::MAX)?;

        let acquired = unsafe {
            self.swapchain.loader().acquire_next_image(
                self.swapchain.handle(),
                u64::MAX,
                self.image_available.handle(),
                vk::Fence::null(),
            )
        };
        let image_index = match acquired {
            Ok((index, suboptimal)) => {
                if suboptimal {
                    self.needs_recreate = true;
                }
                index
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                self.recreate_swapchain()?;
                return Ok(PresentOutcome::Recreated);
            }
            Err(e) => return Err(VulkanError::Api(e).into()),
        };

        // Only reset once work is guaranteed to be submitted
        self.in_flight.reset()?;

        let swap_red_blue = self.swapchain.is_bgra();
        let staging = self.ensure_staging(canvas.as_raw().len())?;
        upload_pixels(staging.contents_mut(), canvas.as_raw(), swap_red_blue);
        let buffer = staging.handle();

        let image = self.swapchain.images()[image_index as usize];
        self.record_copy(image, buffer, canvas.size())?;

        let render_finished = self.render_finished[image_index as usize].handle();
        let wait_semaphores = [self.image_available.handle()];
        let wait_stages = [vk::PipelineStageFlags::TRANSFER];
        let signal_semaphores = [render_finished];
        let command_buffers = [self.command_buffer];

        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores)
            .build();

        unsafe {
            device
                .queue_submit(
                    self.context.device.graphics_queue,
                    &[submit_info],
                    self.in_flight.handle(),
                )
                .map_err(VulkanError::Api)?;
        }

        let swapchains = [self.swapchain.handle()];
        let image_indices = [image_index];
        let present_info = vk::PresentInfoKHR::builder()
            .wait_semaphores(&signal_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        let presented = unsafe {
            self.swapchain
                .loader()
                .queue_present(self.context.device.present_queue, &present_info)
        };
        match presented {
            Ok(false) => {}
            Ok(true) | Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => self.needs_recreate = true,
            Err(e) => return Err(VulkanError::Api(e).into()),
        }

        Ok(PresentOutcome::Presented)
    }
}

impl FramePresenter for VulkanPresenter {
    fn present(&mut self, canvas: &Canvas, framebuffer_size: (u32, u32)) -> Result<PresentOutcome, PresentError> {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Err(PresentError::EmptyCanvas);
        }
        if framebuffer_size.0 == 0 || framebuffer_size.1 == 0 {
            return Ok(PresentOutcome::Skipped);
        }

        if framebuffer_size != self.framebuffer_size {
            self.framebuffer_size = framebuffer_size;
            self.needs_recreate = true;
        }
        if self.needs_recreate {
            self.recreate_swapchain()?;
        }

        self.draw(canvas)
    }

    fn wait_idle(&mut self) {
        if let Err(e) = self.context.wait_idle() {
            log::warn!("Failed waiting for device idle: {}", e);
        }
    }
}

impl Drop for VulkanPresenter {
    fn drop(&mut self) {
        if let Err(e) = self.context.wait_idle() {
            log::warn!("Device not idle at shutdown: {}", e);
        }
    }
}

fn to_extent((width, height): (u32, u32)) -> vk::Extent2D {
    vk::Extent2D { width, height }
}

fn create_semaphores(device: &ash::Device, count: usize) -> VulkanResult<Vec<Semaphore>> {
    (0..count).map(|_| Semaphore::new(device.clone())).collect()
}

/// Region of the canvas that fits in the image
fn copy_extent(canvas: (u32, u32), image: (u32, u32)) -> (u32, u32) {
    (canvas.0.min(image.0), canvas.1.min(image.1))
}

/// Copy RGBA8 pixels into `dst`, optionally reordering them to BGRA8
fn upload_pixels(dst: &mut [u8], src: &[u8], swap_red_blue: bool) {
    let len = src.len().min(dst.len());
    let dst = &mut dst[..len];
    dst.copy_from_slice(&src[..len]);

    if swap_red_blue {
        for pixel in dst.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_keeps_rgba_order() {
        let src = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = [0u8; 8];
        upload_pixels(&mut dst, &src, false);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_upload_swaps_for_bgra() {
        let src = [10, 20, 30, 255, 40, 50, 60, 128];
        let mut dst = [0u8; 12];
        upload_pixels(&mut dst, &src, true);
        assert_eq!(&dst[..8], &[30, 20, 10, 255, 60, 50, 40, 128]);
        assert_eq!(&dst[8..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_copy_clipped_to_image() {
        assert_eq!(copy_extent((800, 600), (640, 480)), (640, 480));
        assert_eq!(copy_extent((320, 600), (640, 480)), (320, 480));
    }
}
